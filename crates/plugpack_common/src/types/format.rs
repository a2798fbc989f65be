/// Coarse classification of a source by its path suffix. `Unknown` is a
/// valid fallback; plugins narrow it further if they care.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Format {
  Html,
  Style,
  Script,
  Json,
  Wasm,
  Image,
  #[default]
  Unknown,
}

impl Format {
  /// Derive the format from an input identifier (path or URL). Query and
  /// fragment suffixes don't take part in the extension.
  pub fn from_input(input: &str) -> Self {
    let path = input.split(['?', '#']).next().unwrap_or(input);
    let Some(ext) = path.rsplit('.').next().filter(|ext| *ext != path) else {
      return Self::Unknown;
    };
    match ext.to_ascii_lowercase().as_str() {
      "html" | "htm" => Self::Html,
      "css" => Self::Style,
      "js" | "mjs" | "cjs" | "jsx" | "ts" | "mts" | "cts" | "tsx" => Self::Script,
      "json" => Self::Json,
      "wasm" => Self::Wasm,
      "png" | "jpg" | "jpeg" | "gif" | "svg" | "webp" | "avif" | "ico" => Self::Image,
      _ => Self::Unknown,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::Format;

  #[test]
  fn derives_from_extension() {
    assert_eq!(Format::from_input("src/index.html"), Format::Html);
    assert_eq!(Format::from_input("src/app.TSX"), Format::Script);
    assert_eq!(Format::from_input("styles/site.css"), Format::Style);
    assert_eq!(Format::from_input("data/config.json"), Format::Json);
    assert_eq!(Format::from_input("lib/mod.wasm"), Format::Wasm);
    assert_eq!(Format::from_input("img/logo.svg"), Format::Image);
  }

  #[test]
  fn unknown_is_the_fallback() {
    assert_eq!(Format::from_input("Makefile"), Format::Unknown);
    assert_eq!(Format::from_input("src/a.xyz"), Format::Unknown);
    assert_eq!(Format::from_input(""), Format::Unknown);
  }

  #[test]
  fn url_queries_are_ignored() {
    assert_eq!(Format::from_input("https://esm.sh/react.ts?dev"), Format::Script);
    assert_eq!(Format::from_input("https://esm.sh/react?dev.ts"), Format::Unknown);
  }
}
