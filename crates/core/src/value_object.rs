//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**: two ISBNs with
/// the same digits are the same ISBN. To "modify" one, build a new one.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct ContractNumber(u32);
///
/// impl ValueObject for ContractNumber {}
///
/// assert_eq!(ContractNumber(7), ContractNumber(7));
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
