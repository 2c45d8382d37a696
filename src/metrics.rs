#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMetrics {
    pub page_number: usize,
    pub command_count: usize,
    pub content_bytes: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentMetrics {
    pub pages: Vec<PageMetrics>,
    pub image_count: usize,
    pub total_bytes: usize,
}
