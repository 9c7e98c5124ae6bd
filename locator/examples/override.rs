use fibre_locator::{capability, register, Capability, Locator, LocatorConfig, Provider, Registry};

trait Storage: Send + Sync {
  fn describe(&self) -> String;
}

type Backend = Box<dyn Storage>;

capability! {
  Store: Provider<Backend>
}

struct Disk;
impl Storage for Disk {
  fn describe(&self) -> String {
    "disk".to_string()
  }
}

struct InMemory;
impl Storage for InMemory {
  fn describe(&self) -> String {
    "memory".to_string()
  }
}

#[derive(Default)]
struct DiskProvider;
impl Provider<Backend> for DiskProvider {
  fn provide(&self) -> Backend {
    Box::new(Disk)
  }
}

#[derive(Default)]
struct InMemoryProvider;
impl Provider<Backend> for InMemoryProvider {
  fn provide(&self) -> Backend {
    Box::new(InMemory)
  }
}

register!(Store => DiskProvider, priority = 10);
register!(Store => InMemoryProvider);

fn main() {
  // Priorities alone pick the disk store.
  let locator = Locator::new(Registry);
  let store = locator.container::<Store>().unwrap();
  println!("By priority: {}", store.get().describe());
  assert_eq!(store.get().describe(), "disk");

  // An override picks an implementation regardless of priority. Overrides can
  // also come from a YAML file or the FIBRE_LOCATOR_OVERRIDES variable.
  let config = LocatorConfig::new().with_override(Store::NAME, "InMemoryProvider");
  let locator = Locator::with_config(Registry, config);
  let store = locator.container::<Store>().unwrap();
  println!("Overridden: {}", store.get().describe());
  assert_eq!(store.get().describe(), "memory");

  // Overrides can be changed at runtime; every request reads the latest.
  locator.clear_override::<Store>();
  assert_eq!(locator.factory::<Store>().unwrap().get().describe(), "disk");
}
