//! Vehicle type.

/// A vehicle in the fleet, identified by its index.
///
/// Capacity is optional: a fleet without a capacity dimension can serve any
/// load.
///
/// # Examples
///
/// ```
/// use fleet_router::models::Vehicle;
///
/// let v = Vehicle::new(0).with_capacity(200);
/// assert_eq!(v.index(), 0);
/// assert_eq!(v.capacity(), Some(200));
///
/// let unbounded = Vehicle::new(1);
/// assert_eq!(unbounded.capacity(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    index: usize,
    capacity: Option<i64>,
}

impl Vehicle {
    /// Creates a vehicle with no capacity limit.
    pub fn new(index: usize) -> Self {
        Self {
            index,
            capacity: None,
        }
    }

    /// Sets the load capacity for this vehicle.
    pub fn with_capacity(mut self, capacity: i64) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Vehicle index (0..K-1).
    pub fn index(&self) -> usize {
        self.index
    }

    /// Maximum load capacity, if the fleet is capacitated.
    pub fn capacity(&self) -> Option<i64> {
        self.capacity
    }
}
