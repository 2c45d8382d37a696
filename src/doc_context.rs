/// What a page callback knows about the page it is stamping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocContext {
    /// 1-based.
    pub page_number: usize,
    pub page_count: usize,
    pub template_name: String,
}

impl DocContext {
    pub fn new(page_number: usize, page_count: usize, template_name: impl Into<String>) -> Self {
        Self {
            page_number,
            page_count,
            template_name: template_name.into(),
        }
    }
}
