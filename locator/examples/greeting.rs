use fibre_locator::{capability, locate, register, Mapping, Provider};

// 1. Declare what is needed: someone to greet, and ways to decorate it.
capability! {
  Subject: Provider<String>
}

capability! {
  Decoration: Mapping<String>
}

// 2. Implementations. Any crate linked into the binary can add more.
#[derive(Default)]
struct World;
impl Provider<String> for World {
  fn provide(&self) -> String {
    "World".to_string()
  }
}

#[derive(Default)]
struct Christian;
impl Provider<String> for Christian {
  fn provide(&self) -> String {
    "Christian".to_string()
  }
}

#[derive(Default)]
struct Salutation;
impl Mapping<String> for Salutation {
  fn map(&self, text: String) -> String {
    format!("Hello {}!", text)
  }
}

#[derive(Default)]
struct Smalltalk;
impl Mapping<String> for Smalltalk {
  fn map(&self, text: String) -> String {
    text + " How do you do?"
  }
}

// 3. Registration. The highest priority provider wins; mappings run from the
//    lowest priority to the highest.
register!(Subject => World, priority = -1);
register!(Subject => Christian);
register!(Decoration => Salutation, priority = -1);
register!(Decoration => Smalltalk);

fn main() {
  let factory = locate!(factory Subject, Decoration);

  println!("Chosen provider: {}", factory.chosen().implementation());
  for mapping in factory.mappings() {
    println!("Mapping: {:?}", mapping);
  }

  let greeting = factory.get();
  println!("{}", greeting);
  assert_eq!(greeting, "Hello Christian! How do you do?");
}
