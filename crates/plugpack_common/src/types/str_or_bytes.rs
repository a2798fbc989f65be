use std::string::FromUtf8Error;

/// Source or bundle payload. Text-bearing formats travel as `Str`, binary
/// ones as `Bytes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrOrBytes {
  Str(String),
  Bytes(Vec<u8>),
}

impl StrOrBytes {
  pub fn try_into_string(self) -> Result<String, FromUtf8Error> {
    match self {
      Self::Str(content) => Ok(content),
      Self::Bytes(content) => String::from_utf8(content),
    }
  }

  pub fn into_bytes(self) -> Vec<u8> {
    match self {
      Self::Str(content) => content.into_bytes(),
      Self::Bytes(content) => content,
    }
  }

  pub fn as_bytes(&self) -> &[u8] {
    match self {
      Self::Str(content) => content.as_bytes(),
      Self::Bytes(content) => content,
    }
  }

  pub fn len(&self) -> usize {
    self.as_bytes().len()
  }

  pub fn is_empty(&self) -> bool {
    self.as_bytes().is_empty()
  }
}

impl From<String> for StrOrBytes {
  fn from(content: String) -> Self {
    Self::Str(content)
  }
}

impl From<&str> for StrOrBytes {
  fn from(content: &str) -> Self {
    Self::Str(content.to_string())
  }
}

impl From<Vec<u8>> for StrOrBytes {
  fn from(content: Vec<u8>) -> Self {
    Self::Bytes(content)
  }
}
