use fibre_locator::{
  capability, global, locate, register, registry, try_locate, Capability, Mapping, Provider,
};
use std::io;

// --- Test Fixtures ---

capability! {
  pub Greeting: Provider<String>
}

capability! {
  pub Punctuation: Mapping<String>
}

capability! {
  Orphan: Provider<String>
}

capability! {
  Flaky: Provider<String>
}

#[derive(Default)]
struct Hello;
impl Provider<String> for Hello {
  fn provide(&self) -> String {
    "Hello".to_string()
  }
}

struct Named(String);
impl Provider<String> for Named {
  fn provide(&self) -> String {
    self.0.clone()
  }
}

#[derive(Default)]
struct Exclaim;
impl Mapping<String> for Exclaim {
  fn map(&self, text: String) -> String {
    text + "!"
  }
}

struct Broken;
impl Provider<String> for Broken {
  fn provide(&self) -> String {
    unreachable!()
  }
}

register!(Greeting => Hello);
register!(Greeting => Named, priority = -10, with = || Named("Hi".to_string()));
register!(Punctuation => Exclaim);
register!(Flaky => Broken, priority = 0, try_with = || -> Result<Broken, io::Error> {
  Err(io::Error::new(io::ErrorKind::NotFound, "backing file is gone"))
});

// --- Macro Tests ---

#[test]
fn test_capability_names_are_module_qualified() {
  assert_eq!(Greeting::NAME, "macros::Greeting");
  assert_eq!(Punctuation::NAME, "macros::Punctuation");
}

#[test]
fn test_locate_factory_and_container() {
  let factory = locate!(factory Greeting);
  let container = locate!(container Greeting, Punctuation);

  assert_eq!(factory.get(), "Hello");
  assert_eq!(container.get(), "Hello!");
}

#[test]
fn test_try_locate_returns_result() {
  assert_eq!(try_locate!(factory Greeting, Punctuation).unwrap().get(), "Hello!");
  assert!(try_locate!(container Orphan).is_err());
}

#[test]
#[should_panic(expected = "Failed to locate required service macros::Orphan")]
fn test_locate_panics_when_nothing_is_registered() {
  let _ = locate!(factory Orphan);
}

#[test]
fn test_register_with_constructor_and_priority() {
  let factory = global().factory::<Greeting>().unwrap();
  let providers = factory.providers();

  assert_eq!(providers.len(), 2);
  assert_eq!(providers[1].implementation(), "macros::Named");
  assert_eq!(providers[1].priority(), -10);
  assert_eq!(providers[1].instance().provide(), "Hi");
}

#[test]
fn test_failing_constructor_is_reported_with_its_source() {
  let err = try_locate!(factory Flaky).unwrap_err();

  assert!(err.is_service_configuration());
  assert!(err.to_string().contains("macros::Broken"));
  let source = std::error::Error::source(&err).expect("constructor error as source");
  assert_eq!(source.to_string(), "backing file is gone");
}

#[test]
fn test_registry_manifest_lists_registered_names() {
  let manifest = registry::manifest(Greeting::NAME);
  let text = manifest.to_string();

  assert!(text.contains("macros::Hello"));
  assert!(text.contains("macros::Named"));
  assert!(registry::capabilities().contains(&Punctuation::NAME));
  assert!(!registry::capabilities().contains(&Orphan::NAME));
}
