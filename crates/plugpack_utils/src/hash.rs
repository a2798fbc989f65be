use sha2::{Digest, Sha256};

/// Lowercase hex digest, 64 characters. Cache paths and content-addressed
/// output names are built from these.
pub fn sha256_hex(input: &[u8]) -> String {
  hex::encode(Sha256::digest(input))
}

#[test]
fn test_sha256_hex() {
  assert_eq!(
    sha256_hex(b"hello"),
    "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
  );
  assert_eq!(
    sha256_hex(b""),
    "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
  );
}
