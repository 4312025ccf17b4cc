//! In-page JavaScript for visibility-aware locator matching.
//!
//! Candidate lists and fill values are injected as JSON so selector quoting
//! can never break out of the script. Every snippet is an IIFE expression
//! returning a JSON-serializable value.

use flow::Locator;

/// Shared helpers: `isVisible` and `firstMatch(candidate, requireVisible)`.
const HELPERS: &str = r#"
  const isVisible = (el) => !!(el.offsetParent !== null || el.getClientRects().length);
  const firstMatch = (c, requireVisible) => {
    const pool = document.querySelectorAll(c.css ? c.css : c.tag);
    for (const el of pool) {
      if (requireVisible && !isVisible(el)) continue;
      if (c.text && !(el.innerText || '').toLowerCase().includes(c.text.toLowerCase())) continue;
      return el;
    }
    return null;
  };
"#;

fn candidates_json(candidates: &[Locator]) -> String {
    serde_json::to_string(candidates).unwrap_or_else(|_| "[]".to_string())
}

fn quote(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

pub fn click_first(candidates: &[Locator]) -> String {
    format!(
        r#"(() => {{
{HELPERS}
  for (const c of {candidates}) {{
    const el = firstMatch(c, true);
    if (el) {{ el.click(); return true; }}
  }}
  return false;
}})()"#,
        candidates = candidates_json(candidates),
    )
}

/// Clears before filling, so a retried fill is idempotent.
pub fn fill_first(candidates: &[Locator], value: &str) -> String {
    format!(
        r#"(() => {{
{HELPERS}
  for (const c of {candidates}) {{
    const el = firstMatch(c, true);
    if (el) {{
      el.focus();
      el.value = '';
      el.value = {value};
      el.dispatchEvent(new Event('input', {{ bubbles: true }}));
      el.dispatchEvent(new Event('change', {{ bubbles: true }}));
      return true;
    }}
  }}
  return false;
}})()"#,
        candidates = candidates_json(candidates),
        value = quote(value),
    )
}

/// Enter fallback: submit the owning form when there is one.
pub fn press_enter(candidates: &[Locator]) -> String {
    format!(
        r#"(() => {{
{HELPERS}
  for (const c of {candidates}) {{
    const el = firstMatch(c, true);
    if (el) {{
      if (el.form) {{
        el.form.requestSubmit ? el.form.requestSubmit() : el.form.submit();
      }} else {{
        el.dispatchEvent(new KeyboardEvent('keydown', {{ key: 'Enter', bubbles: true }}));
      }}
      return true;
    }}
  }}
  return false;
}})()"#,
        candidates = candidates_json(candidates),
    )
}

pub fn read_text(candidates: &[Locator]) -> String {
    format!(
        r#"(() => {{
{HELPERS}
  for (const c of {candidates}) {{
    const el = firstMatch(c, true);
    if (el) return el.innerText;
  }}
  return null;
}})()"#,
        candidates = candidates_json(candidates),
    )
}

pub fn has_text(needle: &str) -> String {
    format!(
        r#"(() => {{
  const body = document.body ? document.body.innerText : '';
  return body.includes({needle});
}})()"#,
        needle = quote(needle),
    )
}

/// Presence check; visibility not required.
pub fn matches_any(candidates: &[Locator]) -> String {
    format!(
        r#"(() => {{
{HELPERS}
  for (const c of {candidates}) {{
    if (firstMatch(c, false)) return true;
  }}
  return false;
}})()"#,
        candidates = candidates_json(candidates),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidates_are_injected_as_json() {
        let script = click_first(&[
            Locator::css("[data-provider='github']"),
            Locator::text("button", "GitHub"),
        ]);
        assert!(script.contains(r#"{"css":"[data-provider='github']"}"#));
        assert!(script.contains(r#"{"tag":"button","text":"GitHub"}"#));
    }

    #[test]
    fn fill_values_cannot_escape_the_script() {
        let script = fill_first(&[Locator::css("#password")], "a'b\"c\\d");
        assert!(script.contains(r#""a'b\"c\\d""#));
    }

    #[test]
    fn snippets_are_expressions() {
        for script in [
            click_first(&[Locator::css("#x")]),
            fill_first(&[Locator::css("#x")], "v"),
            press_enter(&[Locator::css("#x")]),
            read_text(&[Locator::css("#x")]),
            has_text("Dashboard"),
            matches_any(&[Locator::css("#x")]),
        ] {
            assert!(script.starts_with("(() => {"));
            assert!(script.ends_with("})()"));
        }
    }
}
