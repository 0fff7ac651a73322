//! Basic usage of the `simple_vec` crate:
//!
//! * Creating an array.
//! * Adding items.
//! * Reading items, with and without bounds checks.
//! * Removing items.

use simple_vec::{SimpleVec, simple_vec};

fn main() {
    let mut names = SimpleVec::<String>::new();

    // Capacity grows by doubling as items are added.
    names.push("Alice".to_string());
    names.push("Bob".to_string());
    names.push("Charlie".to_string());

    println!(
        "Array contains {} items, with an auto-adjusting capacity of {}",
        names.len(),
        names.capacity()
    );

    // Indexing panics on a bad index, `at()` returns an error instead.
    println!("First item: {}", names[0]);

    match names.at(10) {
        Ok(name) => println!("Item 10: {name}"),
        Err(error) => println!("Checked access failed: {error}"),
    }

    // Items can be inserted and erased anywhere via positions.
    names.insert(names.position(1), "Aaron".to_string());
    names.erase(names.end().prev());
    println!("After editing: {names:?}");

    if let Some(last) = names.pop() {
        println!("Popped: {last}");
    }

    // Arrays compare element by element.
    let numbers = simple_vec![1, 2, 3];
    let more_numbers = simple_vec![1, 2, 3, 4];
    println!("{numbers:?} < {more_numbers:?}: {}", numbers < more_numbers);
}
