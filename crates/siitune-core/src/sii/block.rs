//! Block location by delimiter-depth counting
//!
//! Regex alone cannot find the closing brace of a block, since documents may
//! contain further braced sections. The locator anchors on the block keyword
//! and walks forward balancing `{`/`}` until depth returns to zero.

use regex::Regex;

use super::ConfigBlockKind;

/// Byte span of a block: from the keyword to just past its closing brace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BlockSpan {
    pub start: usize,
    pub end: usize,
}

/// Locate the first block of `kind` in `text`
///
/// Returns `None` when the keyword (followed by an opening brace) is absent
/// or the braces never balance; callers treat that as "nothing to patch".
pub(crate) fn locate_block(text: &str, kind: ConfigBlockKind) -> Option<BlockSpan> {
    let start_re = Regex::new(&format!(r"{}\s*:\s*[^\s{{]+\s*\{{", kind.keyword())).unwrap();
    let start = start_re.find(text)?.start();

    let mut depth = 0i32;
    let mut opened = false;
    for (i, b) in text.as_bytes()[start..].iter().enumerate() {
        match b {
            b'{' => {
                depth += 1;
                opened = true;
            }
            b'}' => {
                depth -= 1;
                if opened && depth == 0 {
                    return Some(BlockSpan {
                        start,
                        end: start + i + 1,
                    });
                }
            }
            _ => {}
        }
    }
    None
}
