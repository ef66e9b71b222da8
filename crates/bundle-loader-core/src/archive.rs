//! Decoded archive headers.

use crate::cid::Cid;

/// The header of a decoded archive: its ordered root list.
///
/// Produced by a decoder and consumed straight away by the loader.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArchiveHeader {
    pub roots: Vec<Cid>,
}

impl ArchiveHeader {
    pub fn new(roots: Vec<Cid>) -> Self {
        Self { roots }
    }

    /// The root, if there is exactly one.
    pub fn single_root(&self) -> Option<Cid> {
        match self.roots.as_slice() {
            [root] => Some(*root),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cid::Codec;

    #[test]
    fn test_single_root() {
        let a = Cid::of(Codec::DagCbor, b"a");
        let b = Cid::of(Codec::DagCbor, b"b");

        assert_eq!(ArchiveHeader::new(vec![]).single_root(), None);
        assert_eq!(ArchiveHeader::new(vec![a]).single_root(), Some(a));
        assert_eq!(ArchiveHeader::new(vec![a, b]).single_root(), None);
        assert_eq!(ArchiveHeader::new(vec![a, a]).single_root(), None);
    }
}
