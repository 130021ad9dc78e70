// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! An example indexing people by badge number and team, with user-defined
//! key and value types.
//!
//! Run with `RUST_LOG=duokey=trace` to see the map's own logging.

use duokey::{errors::Error, Nullable, SharedDuoKeyMap};
use std::thread;
use tracing_subscriber::EnvFilter;

/// A badge number. Badge 0 is never issued, and stands for "no badge".
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
struct Badge(u32);

impl Nullable for Badge {
    fn is_null(&self) -> bool {
        self.0 == 0
    }
}

/// A team name. The empty string stands for "no team".
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
struct Team(String);

impl Team {
    fn new(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl Nullable for Team {
    fn is_null(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Clone, Debug)]
struct Person {
    name: String,
    desk: u16,
}

impl Person {
    fn new(name: &str, desk: u16) -> Self {
        Self { name: name.to_owned(), desk }
    }
}

// People are never null.
impl Nullable for Person {}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let people = SharedDuoKeyMap::new();

    // A person can sit on several teams, so the same badge appears under
    // more than one team.
    thread::scope(|s| {
        s.spawn(|| {
            people
                .add(Badge(17), Team::new("storage"), Person::new("Ada", 101))
                .unwrap();
            people
                .add(Badge(17), Team::new("oncall"), Person::new("Ada", 101))
                .unwrap();
        });
        s.spawn(|| {
            people
                .add(Badge(42), Team::new("storage"), Person::new("Lin", 102))
                .unwrap();
            people
                .add(Badge(8), Team::new("network"), Person::new("Sam", 230))
                .unwrap();
        });
    });

    println!("{} entries", people.len());

    for (badge, person) in people.get_by_name(&Team::new("storage")).unwrap() {
        println!(
            "storage: {} (badge {}, desk {})",
            person.name, badge.0, person.desk
        );
    }

    for (team, person) in people.get_by_id(&Badge(17)).unwrap() {
        println!("badge 17 is {} on {}", person.name, team.0);
    }

    // Rejected adds leave the map unchanged.
    match people.add(Badge(17), Team::new("oncall"), Person::new("Eve", 1)) {
        Err(Error::KeyAlreadyExists { id, name }) => {
            println!("{id:?} is already on {name:?}");
        }
        other => panic!("expected a duplicate, got {other:?}"),
    }
    match people.add(Badge(0), Team::new("storage"), Person::new("?", 0)) {
        Err(error @ Error::NullArgument { .. }) => println!("{error}"),
        other => panic!("expected a null argument, got {other:?}"),
    }

    // Ada leaves the on-call rotation.
    people.remove(&Badge(17), &Team::new("oncall")).unwrap();
    assert!(!people.contains_name(&Team::new("oncall")));

    // Borrow from the map directly while holding the read lock.
    let desks: Vec<u16> = people.read().values().map(|p| p.desk).collect();
    println!("desks in use: {desks:?}");
}
