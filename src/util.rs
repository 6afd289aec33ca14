//! Small utility helpers used across modules.

/// Very small and safe string templating.
/// Replaces occurrences of `{key}` in the template with provided values.
pub fn fill_template(tpl: &str, pairs: &[(&str, &str)]) -> String {
  let mut out = tpl.to_string();
  for (k, v) in pairs {
    let needle = format!("{{{}}}", k);
    out = out.replace(&needle, v);
  }
  out
}

/// Normalize free-text input: trimmed and lowercased. Empty → None.
pub fn normalize_choice(s: &str) -> Option<String> {
  let t = s.trim().to_lowercase();
  if t.is_empty() { None } else { Some(t) }
}

/// Horizontal bar of `width` cells, filled in proportion to `current / maximum`.
pub fn health_bar(current: u32, maximum: u32, width: usize) -> String {
  let maximum = maximum.max(1);
  let filled = ((current as f64 / maximum as f64) * width as f64).round() as usize;
  let filled = filled.min(width);
  format!("{}{}", "♥".repeat(filled), "·".repeat(width - filled))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn template_fills_all_keys() {
    let out = fill_template("A wild {name} appears! HP {hp}", &[("name", "Sumling"), ("hp", "8")]);
    assert_eq!(out, "A wild Sumling appears! HP 8");
  }

  #[test]
  fn health_bar_rounds_and_clamps() {
    assert_eq!(health_bar(5, 10, 10), "♥♥♥♥♥·····");
    assert_eq!(health_bar(0, 8, 4), "····");
    assert_eq!(health_bar(20, 10, 3), "♥♥♥");
    assert_eq!(health_bar(1, 0, 2), "♥♥");
  }

  #[test]
  fn normalize_blank_is_none() {
    assert_eq!(normalize_choice("   "), None);
    assert_eq!(normalize_choice(" Fractions "), Some("fractions".into()));
  }
}
