//! Public macros for declaring capabilities, registering implementations and
//! locating services.

/// Declares a capability marker type.
///
/// The capability's [`NAME`](crate::Capability::NAME) is the module path of
/// the declaration followed by the type name, e.g. `my_app::greeting::Greeting`.
///
/// # Examples
///
/// ```
/// use fibre_locator::{capability, Capability};
///
/// capability! {
///   /// Provides the name to greet.
///   pub Subject: Provider<String>
/// }
///
/// capability! {
///   /// Decorates the greeting.
///   pub Decoration: Mapping<String>
/// }
///
/// assert!(Subject::NAME.ends_with("::Subject"));
/// ```
#[macro_export]
macro_rules! capability {
  (@declare $(#[$meta:meta])* $vis:vis $name:ident, $product:ty, $role:ty) => {
    $(#[$meta])*
    $vis enum $name {}

    impl $crate::Capability for $name {
      const NAME: &'static str = concat!(module_path!(), "::", stringify!($name));
      type Product = $product;
      type Role = $role;
    }
  };

  ($(#[$meta:meta])* $vis:vis $name:ident : Provider<$product:ty> $(;)?) => {
    $crate::capability!(@declare $(#[$meta])* $vis $name, $product, $crate::ProviderRole);
  };

  ($(#[$meta:meta])* $vis:vis $name:ident : Mapping<$product:ty> $(;)?) => {
    $crate::capability!(@declare $(#[$meta])* $vis $name, $product, $crate::MappingRole);
  };
}

/// Registers an implementation of a capability with the link-time registry.
///
/// The implementation is constructed with `Default::default` unless a
/// constructor is given with `with = ...` (infallible) or `try_with = ...`
/// (returning a `Result` whose error converts into a boxed error). The
/// priority defaults to `0`.
///
/// # Examples
///
/// ```
/// use fibre_locator::{capability, register, Locator, Provider, Registry};
///
/// capability! { Subject: Provider<String> }
///
/// #[derive(Default)]
/// struct World;
/// impl Provider<String> for World {
///   fn provide(&self) -> String { "World".into() }
/// }
///
/// struct Named(&'static str);
/// impl Provider<String> for Named {
///   fn provide(&self) -> String { self.0.into() }
/// }
///
/// register!(Subject => World, priority = -1);
/// register!(Subject => Named, priority = 1, with = || Named("Christian"));
///
/// fn main() {
///   let factory = Locator::new(Registry).factory::<Subject>().unwrap();
///   assert_eq!(factory.get(), "Christian");
/// }
/// ```
#[macro_export]
macro_rules! register {
  (@submit $capability:ty, $implementation:ty, $priority:expr, || $body:block) => {
    $crate::__private::inventory::submit! {
      $crate::registry::Registration {
        capability: <$capability as $crate::Capability>::NAME,
        implementation: concat!(module_path!(), "::", stringify!($implementation)),
        name: stringify!($implementation),
        priority: $priority,
        construct: || -> ::std::result::Result<
          ::std::boxed::Box<dyn ::std::any::Any + ::core::marker::Send + ::core::marker::Sync>,
          $crate::BoxError,
        > {
          ::std::result::Result::Ok(::std::boxed::Box::new($body))
        },
      }
    }
  };

  ($capability:ty => $implementation:ty) => {
    $crate::register!($capability => $implementation, priority = 0);
  };

  ($capability:ty => $implementation:ty, priority = $priority:expr) => {
    $crate::register!(
      $capability => $implementation,
      priority = $priority,
      with = <$implementation as ::core::default::Default>::default
    );
  };

  ($capability:ty => $implementation:ty, priority = $priority:expr, with = $constructor:expr) => {
    $crate::register!(@submit $capability, $implementation, $priority, || {
      let instance: ::std::sync::Arc<$crate::ServiceOf<$capability>> =
        ::std::sync::Arc::new(($constructor)());
      instance
    });
  };

  ($capability:ty => $implementation:ty, priority = $priority:expr, try_with = $constructor:expr) => {
    $crate::register!(@submit $capability, $implementation, $priority, || {
      let instance: ::std::sync::Arc<$crate::ServiceOf<$capability>> = ::std::sync::Arc::new(
        ($constructor)().map_err(::std::convert::Into::<$crate::BoxError>::into)?,
      );
      instance
    });
  };
}

/// Locates a service through the [`global`](crate::global) locator.
///
/// Returns a [`CompositeFactory`](crate::CompositeFactory) or a
/// [`CompositeContainer`](crate::CompositeContainer), optionally with a
/// mapping capability.
///
/// # Panics
///
/// Panics if the capability cannot be resolved. For a non-panicking version,
/// use [`try_locate!`](crate::try_locate).
#[macro_export]
macro_rules! locate {
  ($kind:ident $capability:ty) => {
    $crate::try_locate!($kind $capability).unwrap_or_else(|error| {
      panic!(
        "Failed to locate required service {}: {}",
        <$capability as $crate::Capability>::NAME,
        error
      )
    })
  };

  ($kind:ident $capability:ty, $mapping:ty) => {
    $crate::try_locate!($kind $capability, $mapping).unwrap_or_else(|error| {
      panic!(
        "Failed to locate required service {}: {}",
        <$capability as $crate::Capability>::NAME,
        error
      )
    })
  };
}

/// Like [`locate!`](crate::locate) but returns a `Result`.
#[macro_export]
macro_rules! try_locate {
  (factory $capability:ty) => {
    $crate::global().factory::<$capability>()
  };

  (factory $capability:ty, $mapping:ty) => {
    $crate::global().factory_with::<$capability, $mapping>()
  };

  (container $capability:ty) => {
    $crate::global().container::<$capability>()
  };

  (container $capability:ty, $mapping:ty) => {
    $crate::global().container_with::<$capability, $mapping>()
  };
}
