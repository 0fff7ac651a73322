//! Managing the capacity of a `SimpleVec` explicitly:
//!
//! * Reserving capacity up front, at construction or later.
//! * Resizing with default-filled elements.
//! * Clearing without releasing storage.
//! * Swapping storage between arrays.

use simple_vec::{SimpleVec, reserve};

fn main() {
    // A reserve request creates an empty array with room for exactly this many items.
    let mut readings = SimpleVec::<f64>::from(reserve(4));
    println!(
        "Reserved: len {}, capacity {}",
        readings.len(),
        readings.capacity()
    );

    for reading in [0.5, 1.5, 2.5, 3.5] {
        readings.push(reading);
    }
    println!("Filled without reallocating: capacity {}", readings.capacity());

    // Growing beyond the capacity doubles it; new elements are default values.
    readings.resize(6);
    println!(
        "Resized: {readings:?}, capacity {}",
        readings.capacity()
    );

    // Reserving more than the current capacity allocates exactly what was asked for.
    readings.reserve(20);
    println!("Reserved more: capacity {}", readings.capacity());

    // Clearing keeps the storage for reuse.
    readings.clear();
    println!(
        "Cleared: len {}, capacity {}",
        readings.len(),
        readings.capacity()
    );

    // Swapping exchanges storage in constant time.
    let mut other = SimpleVec::from([9.0, 8.0]);
    readings.swap(&mut other);
    println!(
        "After swap: {readings:?} (capacity {}), {other:?} (capacity {})",
        readings.capacity(),
        other.capacity()
    );
}
