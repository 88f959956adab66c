use md5::{Digest, Md5};

/// Hex-encoded MD5 digest of a spec file's bytes.
///
/// Stored in the metadata comment of every generated file so later runs can
/// tell whether the spec changed since the file was written.
pub fn content_hash(bytes: &[u8]) -> String {
    hex::encode(Md5::digest(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        assert_eq!(content_hash(b""), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(content_hash(b"abc"), "900150983cd24fb0d6963f7d28e17f72");
    }

    #[test]
    fn test_digest_is_stable() {
        let spec = b"name = \"Point\"\nfeatures = [\"eq\"]\n";
        assert_eq!(content_hash(spec), content_hash(spec));
        assert_ne!(content_hash(spec), content_hash(b"name = \"Point\"\n"));
    }
}
