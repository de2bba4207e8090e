//! 文件类型分发
//!
//! 三个预览入口共用同一套按扩展名分类的规则。

use crate::models::files::entities::{FileKind, ViewerProfile};

const STANDARD_IMAGES: &[&str] = &["jpg", "jpeg", "png", "gif"];
const EXTENDED_IMAGES: &[&str] = &["webp", "svg"];
const STANDARD_TEXT: &[&str] = &["txt", "csv"];
const EXTENDED_TEXT: &[&str] = &["json", "html", "xml"];

/// 取最后一个点之后的后缀并转为小写
///
/// 没有点、以点结尾、或只有开头一个点（如 `.gitignore`）时返回 `None`。
pub fn file_extension(file_name: &str) -> Option<String> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if ext.is_empty() || stem.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}

/// 按扩展名分类，与文件大小和内容无关
pub fn classify(file_name: &str, profile: ViewerProfile) -> FileKind {
    let Some(ext) = file_extension(file_name) else {
        return FileKind::Unsupported;
    };
    let ext = ext.as_str();
    let extended = profile == ViewerProfile::Extended;

    if STANDARD_IMAGES.contains(&ext) || (extended && EXTENDED_IMAGES.contains(&ext)) {
        FileKind::Image
    } else if ext == "pdf" {
        FileKind::Pdf
    } else if STANDARD_TEXT.contains(&ext) || (extended && EXTENDED_TEXT.contains(&ext)) {
        FileKind::Text
    } else {
        FileKind::Unsupported
    }
}

/// multipart 上传时使用的 MIME 类型
pub fn content_type_for(file_name: &str) -> &'static str {
    match file_extension(file_name).as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain",
        Some("csv") => "text/csv",
        Some("json") => "application/json",
        Some("html") => "text/html",
        Some("xml") => "application/xml",
        Some("zip") => "application/zip",
        Some("doc") => "application/msword",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        _ => "application/octet-stream",
    }
}

/// 验证文件内容的魔术字节是否与扩展名匹配
///
/// 只检查有固定文件头的二进制格式；文本和未知格式交给后端判断。
///
/// # Returns
/// * `true` - 魔术字节匹配或该类型不需要验证
/// * `false` - 魔术字节不匹配
pub fn validate_magic_bytes(data: &[u8], file_name: &str) -> bool {
    let Some(ext) = file_extension(file_name) else {
        return true;
    };

    match ext.as_str() {
        "png" => data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]),
        "jpg" | "jpeg" => data.starts_with(&[0xFF, 0xD8, 0xFF]),
        "gif" => data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a"),
        "webp" => data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP",
        "pdf" => data.starts_with(b"%PDF"),
        "zip" | "docx" | "xlsx" | "pptx" => data.starts_with(&[0x50, 0x4B, 0x03, 0x04]),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_rules() {
        assert_eq!(file_extension("report.PDF").as_deref(), Some("pdf"));
        assert_eq!(file_extension("archive.tar.gz").as_deref(), Some("gz"));
        assert_eq!(file_extension("README"), None);
        assert_eq!(file_extension("trailing."), None);
        assert_eq!(file_extension(".gitignore"), None);
    }

    #[test]
    fn test_standard_classification() {
        let p = ViewerProfile::Standard;
        for name in ["a.jpg", "a.JPEG", "a.png", "a.gif"] {
            assert_eq!(classify(name, p), FileKind::Image, "{name}");
        }
        assert_eq!(classify("report.pdf", p), FileKind::Pdf);
        assert_eq!(classify("notes.txt", p), FileKind::Text);
        assert_eq!(classify("grades.CSV", p), FileKind::Text);
        assert_eq!(classify("data.exe", p), FileKind::Unsupported);
        assert_eq!(classify("photo.webp", p), FileKind::Unsupported);
        assert_eq!(classify("data.json", p), FileKind::Unsupported);
        assert_eq!(classify("noext", p), FileKind::Unsupported);
    }

    #[test]
    fn test_extended_classification() {
        let p = ViewerProfile::Extended;
        assert_eq!(classify("photo.webp", p), FileKind::Image);
        assert_eq!(classify("logo.svg", p), FileKind::Image);
        assert_eq!(classify("data.json", p), FileKind::Text);
        assert_eq!(classify("page.html", p), FileKind::Text);
        assert_eq!(classify("feed.xml", p), FileKind::Text);
        assert_eq!(classify("report.pdf", p), FileKind::Pdf);
        assert_eq!(classify("setup.msi", p), FileKind::Unsupported);
    }

    #[test]
    fn test_content_types() {
        assert_eq!(content_type_for("a.PNG"), "image/png");
        assert_eq!(content_type_for("a.pdf"), "application/pdf");
        assert_eq!(content_type_for("a.bin"), "application/octet-stream");
        assert_eq!(content_type_for("noext"), "application/octet-stream");
    }

    #[test]
    fn test_magic_bytes() {
        let png_header = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert!(validate_magic_bytes(&png_header, "a.png"));
        assert!(!validate_magic_bytes(&png_header, "a.jpg"));
        assert!(validate_magic_bytes(b"%PDF-1.4", "report.pdf"));
        assert!(!validate_magic_bytes(b"hello", "report.pdf"));
        assert!(validate_magic_bytes(b"hello", "notes.txt"));
        assert!(validate_magic_bytes(&[], "unknown.xyz"));
    }
}
