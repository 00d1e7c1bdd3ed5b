//! Building documents with `doc!` and declaring types with `record!` / `string_enum!`.
//!
//! Run with: cargo run --example macro

use recmarshal::{doc, marshal, record, string_enum, unmarshal};
use std::error::Error;

string_enum! {
    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Status {
        Active => "ACTIVE",
        Pending => "PENDING",
        Completed => "COMPLETED",
    }
}

record! {
    #[derive(Debug, PartialEq)]
    struct Task {
        id: u32,
        status: Status,
        priority: i8,
        owner: Option<String> => { json: "assignedTo", omitempty: true },
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    println!("Primitives:");
    println!("  null:   {}", doc!(null));
    println!("  bool:   {}", doc!(true));
    println!("  number: {}", doc!(-42));
    println!("  text:   {}\n", doc!("Hello, documents!"));

    println!("Sequences:");
    println!("  Numbers: {}", doc!([1, -2, 3.5]));
    println!("  Mixed:   {}\n", doc!([1, "two", true, null]));

    let config = doc!({
        "app": { "name": "MyApp", "version": "1.0.0" },
        "database": { "host": "localhost", "port": 5432 },
        "features": ["auth", "logging"],
        "offset": -5
    });
    println!("Nested mappings:\n{}\n", config);

    let items = vec![
        doc!({ "id": 1, "status": "ACTIVE", "priority": 2 }),
        doc!({ "id": 2, "status": "PENDING", "priority": -1, "assignedTo": "bob" }),
        doc!({ "id": 3, "status": "COMPLETED", "priority": 0 }),
    ];
    let summary = doc!({ "total": 3, "items": items });
    println!("Dynamic construction:\n{}\n", summary);

    // Literal documents unmarshal into declared records
    let tasks: Vec<Task> = match summary.get("items") {
        Some(items) => unmarshal(items)?,
        None => Vec::new(),
    };
    for task in &tasks {
        println!("  task {} is {} (owner: {:?})", task.id, task.status, task.owner);
    }

    // A label outside the enum is rejected with its path
    let bad = doc!([{ "id": 4, "status": "LOST", "priority": 0 }]);
    if let Err(err) = unmarshal::<Vec<Task>>(&bad) {
        println!("\nRejected: {}", err);
    }

    let back = marshal(&tasks)?;
    assert_eq!(Some(&back), summary.get("items"));
    println!("✓ Tasks marshal back to the literal documents");

    Ok(())
}
