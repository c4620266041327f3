//! Record binding -- the per-type member table that stands in for
//! runtime reflection.
//!
//! A bindable record implements [`JsonRecord`] by registering each
//! participating member with a [`RecordBuilder`]: the declared name plus
//! a getter/setter pair. Two annotations adjust participation:
//!
//! - [`Member::rename`] overrides the external (wire) name on both paths
//! - [`Member::ignore`] excludes the member from both paths
//!
//! The resulting [`Descriptor`] is built once per type per thread and
//! cached for the lifetime of the thread. Descriptors are never
//! invalidated; a type's member table is assumed immutable for the
//! process lifetime. Parse lookups are case-insensitive, serialization
//! uses the stored external name verbatim.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::decoder::FromJson;
use crate::encoder::ToJson;
use crate::error::Result;
use crate::scanner::{split, strip_edges};

/// A JSON-bindable structured record.
///
/// `Default` supplies the zero-initialized instance that parsing
/// populates; no other construction logic runs. Pair the impl with
/// [`bindable!`](crate::bindable) to derive the codec traits.
pub trait JsonRecord: Default + 'static {
    /// Register every JSON-participating member, in declared order.
    fn describe(b: &mut RecordBuilder<Self>);
}

/// A JSON-bindable enum: a case-sensitive table of declared variant
/// names. Unknown names parse as the `Default` variant. Implemented by
/// [`json_enum!`](crate::json_enum).
pub trait JsonEnum: Sized {
    /// Case-sensitive lookup of a declared variant name.
    fn from_name(name: &str) -> Option<Self>;

    /// The declared name of this variant.
    fn name(&self) -> &'static str;
}

struct MemberEntry<T> {
    external: &'static str,
    ignored: bool,
    parse_into: Box<dyn Fn(&mut T, &str) -> Result<()>>,
    is_null: Box<dyn Fn(&T) -> bool>,
    append: Box<dyn Fn(&T, &mut String)>,
}

/// Collects member registrations during [`JsonRecord::describe`].
pub struct RecordBuilder<T> {
    members: Vec<MemberEntry<T>>,
}

impl<T: 'static> RecordBuilder<T> {
    fn new() -> Self {
        Self {
            members: Vec::new(),
        }
    }

    /// Register a member under its declared name.
    ///
    /// `get`/`set` are plain accessor functions; the member's JSON
    /// behavior comes entirely from its type's [`FromJson`]/[`ToJson`]
    /// impls. A `null` (or unusable) fragment stores the member type's
    /// default value.
    pub fn field<F>(
        &mut self,
        name: &'static str,
        get: fn(&T) -> &F,
        set: fn(&mut T, F),
    ) -> Member<'_, T>
    where
        F: FromJson + ToJson + Default + 'static,
    {
        self.members.push(MemberEntry {
            external: name,
            ignored: false,
            parse_into: Box::new(move |instance: &mut T, frag: &str| {
                let value = F::from_fragment(frag)?.unwrap_or_default();
                set(instance, value);
                Ok(())
            }),
            is_null: Box::new(move |instance: &T| get(instance).is_json_null()),
            append: Box::new(move |instance: &T, out: &mut String| {
                get(instance).append_json(out);
            }),
        });
        Member {
            index: self.members.len() - 1,
            builder: self,
        }
    }
}

/// Handle to the member just registered, for attaching annotations.
pub struct Member<'a, T> {
    builder: &'a mut RecordBuilder<T>,
    index: usize,
}

impl<T> Member<'_, T> {
    /// Override the external name used in JSON text, on both the parse
    /// and serialize paths. An empty name keeps the declared one.
    pub fn rename(self, external: &'static str) -> Self {
        if !external.is_empty() {
            self.builder.members[self.index].external = external;
        }
        self
    }

    /// Exclude the member from both parsing and serialization. An
    /// ignored member is never written to, even when a matching key is
    /// present in the input.
    pub fn ignore(self) -> Self {
        self.builder.members[self.index].ignored = true;
        self
    }
}

/// The cached member table for one record type.
pub struct Descriptor<T> {
    members: Vec<MemberEntry<T>>,
    /// Lowercased external name -> index into `members`.
    by_name: HashMap<String, usize>,
}

impl<T: JsonRecord> Descriptor<T> {
    fn build() -> Self {
        let mut builder = RecordBuilder::new();
        T::describe(&mut builder);
        let mut by_name = HashMap::with_capacity(builder.members.len());
        for (index, member) in builder.members.iter().enumerate() {
            if member.ignored {
                continue;
            }
            by_name.insert(member.external.to_lowercase(), index);
        }
        Self {
            members: builder.members,
            by_name,
        }
    }

    fn lookup(&self, external: &str) -> Option<&MemberEntry<T>> {
        self.by_name
            .get(&external.to_lowercase())
            .map(|&index| &self.members[index])
    }
}

thread_local! {
    static DESCRIPTORS: RefCell<HashMap<TypeId, Rc<dyn Any>>> = RefCell::new(HashMap::new());
}

/// Fetch the descriptor for `T`, building it on first use.
///
/// The cache is thread-local, so no locking is involved; each thread
/// builds its own copy of a descriptor the first time it touches the
/// type.
pub fn descriptor_of<T: JsonRecord>() -> Rc<Descriptor<T>> {
    DESCRIPTORS.with(|cache| {
        let mut cache = cache.borrow_mut();
        let entry = cache
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Rc::new(Descriptor::<T>::build()) as Rc<dyn Any>);
        match Rc::clone(entry).downcast::<Descriptor<T>>() {
            Ok(descriptor) => descriptor,
            Err(_) => unreachable!("descriptor cache entries are keyed by TypeId"),
        }
    })
}

/// Parse a brace-delimited fragment into a fresh record instance.
///
/// The instance starts from `Default`; each key found in the descriptor
/// is parsed against its member's declared type and stored through the
/// setter. An odd key/value count leaves the instance default-initialized;
/// empty and unknown keys are skipped silently.
pub fn parse_record<T: JsonRecord>(frag: &str) -> Result<Option<T>> {
    if frag == "null" {
        return Ok(None);
    }
    if !(frag.starts_with('{') && frag.ends_with('}')) {
        return Ok(None);
    }
    let descriptor = descriptor_of::<T>();
    let mut instance = T::default();
    let elems = split(frag);
    if elems.len() % 2 != 0 {
        return Ok(Some(instance));
    }
    for pair in elems.chunks_exact(2) {
        if pair[0].len() <= 2 {
            continue;
        }
        let key = strip_edges(&pair[0]);
        if let Some(member) = descriptor.lookup(key) {
            (member.parse_into)(&mut instance, &pair[1])?;
        }
    }
    Ok(Some(instance))
}

/// Serialize a record: `"externalName":value` for every non-ignored,
/// non-null member, in registration order.
pub fn append_record<T: JsonRecord>(record: &T, out: &mut String) {
    let descriptor = descriptor_of::<T>();
    out.push('{');
    let mut first = true;
    for member in &descriptor.members {
        if member.ignored || (member.is_null)(record) {
            continue;
        }
        if !first {
            out.push(',');
        }
        first = false;
        out.push('"');
        out.push_str(member.external);
        out.push_str("\":");
        (member.append)(record, out);
    }
    out.push('}');
}

/// Implement [`FromJson`](crate::FromJson) and [`ToJson`](crate::ToJson)
/// for one or more [`JsonRecord`] types.
///
/// Coherence rules rule out a blanket impl over every `JsonRecord`, so
/// each record opts in explicitly:
///
/// ```
/// use jsonbind_core::{JsonRecord, RecordBuilder};
///
/// #[derive(Default, Debug, PartialEq)]
/// struct School {
///     id: i64,
///     name: Option<String>,
/// }
///
/// impl JsonRecord for School {
///     fn describe(b: &mut RecordBuilder<Self>) {
///         b.field("Id", |s| &s.id, |s, v| s.id = v);
///         b.field("Name", |s| &s.name, |s, v| s.name = v);
///     }
/// }
///
/// jsonbind_core::bindable!(School);
///
/// let school: School = jsonbind_core::from_str(r#"{"Id":72,"Name":"Alien School"}"#)
///     .unwrap()
///     .unwrap();
/// assert_eq!(school.id, 72);
/// ```
#[macro_export]
macro_rules! bindable {
    ($($ty:ty),* $(,)?) => {$(
        impl $crate::FromJson for $ty {
            fn from_fragment(frag: &str) -> $crate::Result<Option<Self>> {
                $crate::bind::parse_record(frag)
            }
        }

        impl $crate::ToJson for $ty {
            fn append_json(&self, out: &mut String) {
                $crate::bind::append_record(self, out);
            }
        }
    )*};
}

/// Declare a JSON-bindable enum.
///
/// The first variant is the `Default`, and the fallback for names that
/// match no declared variant. Serialization emits the variant's declared
/// name, quoted.
///
/// ```
/// jsonbind_core::json_enum! {
///     pub enum Color { Red, Green, Blue }
/// }
///
/// let c: Option<Color> = jsonbind_core::from_str("\"Green\"").unwrap();
/// assert_eq!(c, Some(Color::Green));
/// assert_eq!(jsonbind_core::to_string(&Color::Blue), "\"Blue\"");
/// ```
#[macro_export]
macro_rules! json_enum {
    ($(#[$meta:meta])* $vis:vis enum $name:ident { $first:ident $(, $rest:ident)* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        $vis enum $name {
            #[default]
            $first,
            $($rest,)*
        }

        impl $crate::JsonEnum for $name {
            fn from_name(name: &str) -> Option<Self> {
                if name == stringify!($first) {
                    return Some(Self::$first);
                }
                $(
                    if name == stringify!($rest) {
                        return Some(Self::$rest);
                    }
                )*
                None
            }

            fn name(&self) -> &'static str {
                match self {
                    Self::$first => stringify!($first),
                    $(Self::$rest => stringify!($rest),)*
                }
            }
        }

        impl $crate::FromJson for $name {
            fn from_fragment(frag: &str) -> $crate::Result<Option<Self>> {
                $crate::decoder::enum_from_fragment(frag)
            }
        }

        impl $crate::ToJson for $name {
            fn append_json(&self, out: &mut String) {
                out.push('"');
                out.push_str($crate::JsonEnum::name(self));
                out.push('"');
            }
        }
    };
}
