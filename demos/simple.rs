//! Marshal a list of records to a document, through JSON text, and back.
//!
//! Run with: cargo run --example simple

use recmarshal::{marshal, record, unmarshal, Document};
use std::error::Error;
use uuid::Uuid;

record! {
    #[derive(Debug, PartialEq)]
    struct User {
        id: Uuid,
        name: String,
        email: String => { json: "emailAddress" },
        nickname: Option<String> => { omitempty: true },
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let users = vec![
        User {
            id: Uuid::from_u128(42),
            name: "Alice Johnson".to_string(),
            email: "alice@example.com".to_string(),
            nickname: Some("Al".to_string()),
        },
        User {
            id: Uuid::from_u128(43),
            name: "Bob Smith".to_string(),
            email: "bob@example.com".to_string(),
            nickname: None,
        },
    ];

    // Typed records to a document
    let document = marshal(&users)?;
    println!("Document:\n{}\n", document);

    // The document is plain serde data
    let text = serde_json::to_string_pretty(&document)?;
    println!("JSON text:\n{}\n", text);

    // And back again
    let parsed: Document = serde_json::from_str(&text)?;
    let users_back: Vec<User> = unmarshal(&parsed)?;
    assert_eq!(users, users_back);
    println!("✓ Round-trip successful");

    Ok(())
}
