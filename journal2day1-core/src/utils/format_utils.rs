/// Extensions staged under `videos/`; everything else goes to `photos/`.
const VIDEO_EXTENSIONS: &[&str] = &["mov", "mp4", "m4v", "avi"];

/// Uppercase hexadecimal form with separators removed: `ab-12` → `AB12`.
pub fn compact_identifier(id: &str) -> String {
    id.chars()
        .filter(|c| *c != '-')
        .flat_map(char::to_uppercase)
        .collect()
}

/// Attachment type for an extension: lowercased, with `jpg` spelled `jpeg`.
pub fn normalize_media_type(extension: &str) -> String {
    if extension.eq_ignore_ascii_case("jpg") {
        "jpeg".to_string()
    } else {
        extension.to_lowercase()
    }
}

pub fn is_video_extension(extension: &str) -> bool {
    VIDEO_EXTENSIONS
        .iter()
        .any(|video| video.eq_ignore_ascii_case(extension))
}

/// Markdown line that embeds a photo attachment in the entry text.
pub fn photo_placeholder(identifier: &str) -> String {
    format!("![](dayone-moment://{identifier})")
}

/// Assembles the Day One entry text.
///
/// ```text
/// # Title
///
/// Body…
///
/// ![](dayone-moment://…)
/// ```
///
/// Empty parts are left out; an entry with nothing to say yields an empty string.
pub fn build_entry_text(title: &str, body: &str, photo_refs: &[String]) -> String {
    let mut parts = Vec::new();
    if !title.is_empty() {
        parts.push(format!("# {title}"));
    }
    if !body.is_empty() {
        parts.push(body.to_string());
    }
    if !photo_refs.is_empty() {
        parts.push(photo_refs.join("\n"));
    }
    parts.join("\n\n")
}
