use std::fmt;

/// Block a chain read is pinned to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlockTag {
    /// Resolved by the node on every read, so two reads may see different blocks.
    #[default]
    Latest,
    Number(u64),
}

/// Turns an optional caller-supplied block number into a [`BlockTag`].
///
/// Missing, zero and negative inputs all map to [`BlockTag::Latest`]. This is
/// deliberately permissive: a caller passing `0` gets the latest block, not
/// genesis.
pub fn parse_block_tag(block_number: Option<i64>) -> BlockTag {
    match block_number {
        Some(number) if number > 0 => BlockTag::Number(number as u64),
        _ => BlockTag::Latest,
    }
}

impl fmt::Display for BlockTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockTag::Latest => f.write_str("latest"),
            BlockTag::Number(number) => write!(f, "{number}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_and_missing_numbers_pin_to_latest() {
        assert_eq!(parse_block_tag(None), BlockTag::Latest);
        assert_eq!(parse_block_tag(Some(0)), BlockTag::Latest);
        assert_eq!(parse_block_tag(Some(-5)), BlockTag::Latest);
    }

    #[test]
    fn positive_numbers_are_kept() {
        assert_eq!(parse_block_tag(Some(12345)), BlockTag::Number(12345));
        assert_eq!(BlockTag::Number(12345).to_string(), "12345");
        assert_eq!(BlockTag::Latest.to_string(), "latest");
    }
}
