use fibre_locator::{capability, Catalog, Locator};
use std::sync::Arc;

capability! {
  Endpoint: Provider<String>
}

// A function that resolves through whatever locator it is handed, so it can
// be exercised against a controlled catalog.
fn endpoint(locator: &Locator<Catalog>) -> String {
  locator
    .factory::<Endpoint>()
    .expect("No endpoint registered")
    .get()
}

fn main() {
  let locator = Locator::new(Catalog::new());
  locator
    .enumerator()
    .add::<Endpoint>("Production", 0, || Arc::new(|| "https://api.example.com".to_string()));
  println!("Endpoint: {}", endpoint(&locator));

  // Registering a higher priority implementation at runtime takes effect on
  // the next request.
  locator
    .enumerator()
    .add::<Endpoint>("Staging", 5, || Arc::new(|| "https://staging.example.com".to_string()));
  println!("Endpoint: {}", endpoint(&locator));
  assert_eq!(endpoint(&locator), "https://staging.example.com");

  locator.enumerator().remove::<Endpoint>("Staging");
  assert_eq!(endpoint(&locator), "https://api.example.com");
  println!("Back to: {}", endpoint(&locator));
}
