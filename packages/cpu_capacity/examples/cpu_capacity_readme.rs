//! Applies capacity overrides to a simulated 8-processor system and reverts them again.

use cpu_capacity::{Session, UnitStore};
use new_zealand::nz;

fn main() {
    let session = Session::new(UnitStore::new(nz!(8)));
    let reader = session.reader();

    session
        .set("0-3:1024,4-7:512")
        .expect("list is valid for an 8-processor system");
    println!("Applied: {}", session.get());
    println!("Capacities: {:?}", reader.to_vec());

    match session.set("8:256") {
        Ok(()) => println!("Unexpectedly accepted a list for processor 8"),
        Err(e) => println!("Rejected: {e}"),
    }

    // Restores every processor to the value it had before the first change.
    session.teardown();
    println!("After teardown: {:?}", reader.to_vec());
}
