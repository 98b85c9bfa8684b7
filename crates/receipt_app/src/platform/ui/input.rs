use std::fs;
use std::path::{Path, PathBuf};

use receipt_core::ImageUpload;
use receipt_logging::receipt_warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Upload(Option<PathBuf>),
    History,
    Refresh,
    Home,
    Dismiss,
    Help,
    Quit,
    Unknown(String),
    Empty,
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "" => Command::Empty,
        "upload" | "u" => {
            let path = rest.trim_matches(['"', '\'']);
            Command::Upload((!path.is_empty()).then(|| PathBuf::from(path)))
        }
        "history" | "h" => Command::History,
        "refresh" | "r" => Command::Refresh,
        "home" | "back" | "b" => Command::Home,
        "dismiss" | "d" => Command::Dismiss,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    }
}

/// Read an image from disk. Unreadable files are logged and yield `None`.
pub fn load_image(path: &Path) -> Option<ImageUpload> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            receipt_warn!("Cannot read image {:?}: {}", path, err);
            return None;
        }
    };
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());

    let upload = ImageUpload::new(file_name, bytes);
    Some(match guess_mime(path) {
        Some(mime) => upload.with_content_type(mime),
        None => upload,
    })
}

fn guess_mime(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parses_commands_and_aliases() {
        assert_eq!(parse_command("  history "), Command::History);
        assert_eq!(parse_command("B"), Command::Home);
        assert_eq!(parse_command("q"), Command::Quit);
        assert_eq!(parse_command(""), Command::Empty);
        assert_eq!(
            parse_command("frobnicate now"),
            Command::Unknown("frobnicate now".to_string())
        );
    }

    #[test]
    fn upload_path_may_contain_spaces_and_quotes() {
        assert_eq!(
            parse_command("upload \"my receipts/gpay shot.png\""),
            Command::Upload(Some(PathBuf::from("my receipts/gpay shot.png")))
        );
        assert_eq!(parse_command("upload"), Command::Upload(None));
    }

    #[test]
    fn load_image_reads_bytes_and_guesses_mime() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Receipt.JPG");
        fs::write(&path, b"jpeg-bytes").unwrap();

        let image = load_image(&path).expect("image");
        assert_eq!(image.file_name, "Receipt.JPG");
        assert_eq!(image.content_type.as_deref(), Some("image/jpeg"));
        assert_eq!(image.bytes, b"jpeg-bytes");
    }

    #[test]
    fn missing_image_yields_none() {
        let temp = TempDir::new().unwrap();
        assert_eq!(load_image(&temp.path().join("nope.png")), None);
    }
}
