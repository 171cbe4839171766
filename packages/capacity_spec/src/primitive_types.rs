/// Identifies a specific unit (e.g. a processor) that a capacity can be assigned to.
///
/// Units are numbered from zero, matching the numbering used by operating system tooling.
pub type UnitId = u32;

/// A relative processing capacity of a unit.
///
/// Higher is faster. The upper bound is not enforced by the parser; see the package that applies
/// the values for the permitted range.
pub type Capacity = u64;
