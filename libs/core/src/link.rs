//! # リンク解析
//!
//! ユーザー入力の URL から動画 ID を抽出する。
//! watch 形式 / youtu.be 短縮形式 / shorts / embed に対応する。

use crate::error::LensError;
use once_cell::sync::Lazy;
use regex::Regex;

/// 動画 ID の形状 (英数字と `-` `_`、6〜16文字)
const ID_SHAPE: &str = r"[A-Za-z0-9_-]{6,16}";

/// 受理するリンク形式。ホスト名まで含めて先頭アンカーで照合し、
/// youtube.com / youtu.be 以外のドメインは弾く。
static LINK_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        format!(r"^(?:https?://)?(?:www\.|m\.)?youtube\.com/watch\?(?:[^#\s]*&)?v=({ID_SHAPE})"),
        format!(r"^(?:https?://)?youtu\.be/({ID_SHAPE})"),
        format!(r"^(?:https?://)?(?:www\.|m\.)?youtube\.com/(?:shorts|embed)/({ID_SHAPE})"),
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static link pattern"))
    .collect()
});

static ID_ONLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("^{ID_SHAPE}$")).expect("static id pattern"));

/// リンクから動画 ID を抽出する
pub fn extract_video_id(link: &str) -> Result<String, LensError> {
    let trimmed = link.trim();
    for pattern in LINK_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(trimmed) {
            if let Some(id) = caps.get(1) {
                return Ok(id.as_str().to_string());
            }
        }
    }
    Err(LensError::InvalidLink {
        input: link.to_string(),
    })
}

/// 文字列が動画 ID そのものの形状かどうか
///
/// ダウンロードルートがファイルパスを組み立てる前の検証に使う。
pub fn is_video_id(candidate: &str) -> bool {
    ID_ONLY.is_match(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_link() {
        let id = extract_video_id("https://www.youtube.com/watch?v=abc123XYZ_").unwrap();
        assert_eq!(id, "abc123XYZ_");
    }

    #[test]
    fn test_short_link_same_id() {
        let id = extract_video_id("https://youtu.be/abc123XYZ_").unwrap();
        assert_eq!(id, "abc123XYZ_");
    }

    #[test]
    fn test_watch_link_with_extra_params() {
        let id =
            extract_video_id("https://www.youtube.com/watch?list=PLx&v=dQw4w9WgXcQ&t=30").unwrap();
        assert_eq!(id, "dQw4w9WgXcQ");
    }

    #[test]
    fn test_shorts_and_embed_links() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/shorts/abc123def45").unwrap(),
            "abc123def45"
        );
        assert_eq!(
            extract_video_id("https://www.youtube.com/embed/dQw4w9WgXcQ").unwrap(),
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_scheme_and_www_are_optional() {
        assert_eq!(
            extract_video_id("youtube.com/watch?v=dQw4w9WgXcQ").unwrap(),
            "dQw4w9WgXcQ"
        );
        assert_eq!(
            extract_video_id("m.youtube.com/watch?v=dQw4w9WgXcQ").unwrap(),
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_wrong_domain_rejected() {
        assert!(extract_video_id("https://vimeo.com/123456789").is_err());
        assert!(extract_video_id("https://example.com/watch?v=abc123XYZ_").is_err());
    }

    #[test]
    fn test_missing_id_rejected() {
        assert!(extract_video_id("https://www.youtube.com/watch").is_err());
        assert!(extract_video_id("https://www.youtube.com/playlist?list=PLx").is_err());
        assert!(extract_video_id("").is_err());
    }

    #[test]
    fn test_invalid_link_error_carries_input() {
        let err = extract_video_id("not a link").unwrap_err();
        match err {
            LensError::InvalidLink { input } => assert_eq!(input, "not a link"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_is_video_id() {
        assert!(is_video_id("abc123XYZ_"));
        assert!(is_video_id("dQw4w9WgXcQ"));
        assert!(!is_video_id("../etc/passwd"));
        assert!(!is_video_id("abc"));
        assert!(!is_video_id("dQw4w9WgXcQ/extra"));
    }
}
