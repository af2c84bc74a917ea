pub const DEFAULT_IMAGE_NAME: &str = "Image";
pub const PREVIEW_SEGMENT: &str = "/preview/";

/// Image referenced by an image-view marker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageRef {
    pub src: String,
    /// `None` when the marker carries no name or an empty one.
    pub name: Option<String>,
}

impl ImageRef {
    /// Missing source becomes an empty string.
    pub fn new(src: Option<String>, name: Option<String>) -> Self {
        Self {
            src: src.unwrap_or_default(),
            name: name.filter(|name| !name.is_empty()),
        }
    }

    pub fn display_name<'a>(&'a self, default_name: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(default_name)
    }
}

/// Full-size file URL for a preview URL: the first `/preview/` segment is
/// collapsed to `/`.
pub fn download_href(src: &str) -> String {
    src.replacen(PREVIEW_SEGMENT, "/", 1)
}

/// Everything the preview dialog displays for one image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreviewContent {
    pub src: String,
    pub alt: String,
    pub title: String,
    pub download_href: String,
    pub download_name: String,
}

impl PreviewContent {
    /// `default_name` stands in for images without a name.
    pub fn new(image: &ImageRef, default_name: &str) -> Self {
        let name = image.display_name(default_name).to_string();
        Self {
            src: image.src.clone(),
            alt: name.clone(),
            title: name.clone(),
            download_href: download_href(&image.src),
            download_name: name,
        }
    }
}
