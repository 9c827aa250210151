//! Book name guessing for imported documents.
//!
//! Documents arrive as opaque URIs (`content://…/Inbox.org`,
//! `file:///tmp/todo.org?x=1`). The last path segment is taken as the file
//! name; if it carries a supported extension the stem becomes the suggested
//! book name for the "import as" prompt.

/// File extensions that can be imported as books.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["org"];

/// Returns the last path segment of a URI, without query or fragment,
/// with `%XX` escapes decoded.
#[must_use]
pub fn file_name(uri: &str) -> Option<String> {
    let without_fragment = uri.split('#').next().unwrap_or(uri);
    let path = without_fragment.split('?').next().unwrap_or(without_fragment);
    let segment = path.rsplit('/').next().unwrap_or(path);

    let decoded = percent_decode(segment);
    // Some providers encode the whole document path into one segment.
    let name = decoded.rsplit('/').next().unwrap_or(&decoded).trim();

    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Suggested book name for a document URI, or `None` if the file name is
/// missing or its extension is not supported.
///
/// ```
/// use panenav::infrastructure::guess_book_name;
///
/// assert_eq!(guess_book_name("content://docs/Inbox.org"), Some("Inbox".to_string()));
/// assert_eq!(guess_book_name("content://docs/photo.jpg"), None);
/// ```
#[must_use]
pub fn guess_book_name(uri: &str) -> Option<String> {
    let name = file_name(uri)?;
    let (stem, extension) = name.rsplit_once('.')?;

    let supported = SUPPORTED_EXTENSIONS
        .iter()
        .any(|ext| ext.eq_ignore_ascii_case(extension));

    if supported && !stem.is_empty() {
        Some(stem.to_string())
    } else {
        None
    }
}

fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).ok();
            if let Some(byte) = hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                out.push(byte);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }

    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_strips_query_and_fragment() {
        assert_eq!(file_name("file:///tmp/todo.org?x=1#top").as_deref(), Some("todo.org"));
        assert_eq!(file_name("content://docs/").as_deref(), None);
    }

    #[test]
    fn encoded_document_paths_are_decoded() {
        assert_eq!(
            guess_book_name("content://com.provider/document/primary%3ANotes%2FWork%20Log.org"),
            Some("Work Log".to_string())
        );
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        assert_eq!(guess_book_name("file:///a/B.ORG"), Some("B".to_string()));
        assert_eq!(guess_book_name("file:///a/.org"), None);
        assert_eq!(guess_book_name("file:///a/readme"), None);
    }

    #[test]
    fn malformed_escapes_pass_through() {
        assert_eq!(percent_decode("100%"), "100%");
        assert_eq!(percent_decode("a%zzb"), "a%zzb");
    }
}
