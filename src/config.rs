pub const API_BASE: &str = "https://www.datakick.org/api";
pub const USER_AGENT: &str = concat!("datakick-sdk/", env!("CARGO_PKG_VERSION"));

/// Extensions accepted by the image upload endpoint (case-sensitive).
pub const VALID_IMAGE_EXTENSIONS: &[&str] = &[".jpeg", ".jpg"];

/// Largest image the service accepts: 1 MiB.
pub const MAX_IMAGE_SIZE: u64 = 1024 * 1024;

pub fn normalize_base(base: &str) -> String {
    base.trim_end_matches('/').to_string()
}

pub fn product_url(base: &str, gtin14: &str) -> String {
    format!("{}/items/{}", base, gtin14)
}

pub fn images_url(base: &str, gtin14: &str) -> String {
    format!("{}/items/{}/images", base, gtin14)
}

pub fn list_url(base: &str, page: u64) -> String {
    format!("{}/items?page={}", base, page)
}

/// Only spaces are rewritten (to `+`); other characters pass through as-is.
pub fn search_url(base: &str, query: &str) -> String {
    format!("{}/items?query={}", base, query.replace(' ', "+"))
}
