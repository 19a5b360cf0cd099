/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the Caravel Emulator Types library.

--*/

/// Management core data width
pub type RvData = u32;

/// Management core address width
pub type RvAddr = u32;

/// Management core IO operation size
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum RvSize {
    Byte = 1,
    HalfWord = 2,
    Word = 4,
    Invalid = 0,
}

impl From<RvSize> for usize {
    fn from(size: RvSize) -> usize {
        match size {
            RvSize::Byte => 1,
            RvSize::HalfWord => 2,
            RvSize::Word => 4,
            RvSize::Invalid => panic!("invalid access size"),
        }
    }
}

impl From<usize> for RvSize {
    fn from(size: usize) -> RvSize {
        match size {
            1 => RvSize::Byte,
            2 => RvSize::HalfWord,
            4 => RvSize::Word,
            _ => RvSize::Invalid,
        }
    }
}

impl std::fmt::Display for RvSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            RvSize::Byte => write!(f, "Byte"),
            RvSize::HalfWord => write!(f, "HalfWord"),
            RvSize::Word => write!(f, "Word"),
            RvSize::Invalid => write!(f, "Invalid"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_conversion() {
        assert_eq!(usize::from(RvSize::Byte), 1);
        assert_eq!(usize::from(RvSize::HalfWord), 2);
        assert_eq!(usize::from(RvSize::Word), 4);
        assert_eq!(RvSize::from(4_usize), RvSize::Word);
        assert_eq!(RvSize::from(3_usize), RvSize::Invalid);
    }
}
