use fibre_locator::{capability, global, locate, Capability};
use std::panic;

capability! {
  Unregistered: Provider<u32>
}

fn main() {
  // --- Using the panicking `locate!` macro ---
  println!("Attempting to locate a capability nobody implements...");

  let result = panic::catch_unwind(|| {
    // This line will panic!
    let _factory = locate!(factory Unregistered);
  });

  assert!(result.is_err(), "locate! should have panicked.");
  println!("Successfully caught the expected panic from locate!.");

  // --- Using the fallible locator API ---
  println!("\nNow, attempting to locate through the `Result` API...");

  match global().factory::<Unregistered>() {
    Ok(_) => panic!("Should not have found an implementation!"),
    Err(error) => {
      assert!(error.is_service_configuration());
      println!("Correctly received an error for {}: {}", Unregistered::NAME, error);
    }
  }
}
