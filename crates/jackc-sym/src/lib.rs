//! Symbol table: scope + storage allocation for one class (`class_table`)
//! or one subroutine (`subroutine_table`).
//!
//! The compilation engine keeps exactly two of these — never a generalized
//! scope stack — and looks up an identifier in the subroutine table first,
//! falling back to the class table. This crate does not encode that
//! two-level precedence itself (that's the engine's job); it only
//! implements a single table and its storage bookkeeping.

use indexmap::IndexMap;

/// The storage segment an identifier is allocated to. `Field` is a
/// source-level concept only: [`SymbolTable::define`] remaps it to [`Segment::This`]
/// before storing the entry, since that's the VM segment fields live in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Segment {
    Field,
    This,
    Static,
    Arg,
    Local,
    Const,
    That,
    Pointer,
    Temp,
}

impl Segment {
    /// The segment name as it appears in emitted VM instructions.
    pub fn vm_name(self) -> &'static str {
        match self {
            Segment::Field | Segment::This => "this",
            Segment::Static => "static",
            Segment::Arg => "argument",
            Segment::Local => "local",
            Segment::Const => "constant",
            Segment::That => "that",
            Segment::Pointer => "pointer",
            Segment::Temp => "temp",
        }
    }

    /// `Field` is never a real counter; it is tracked as `This`.
    fn counted_as(self) -> Segment {
        match self {
            Segment::Field => Segment::This,
            other => other,
        }
    }
}

/// One symbol-table entry: the declared type plus its storage location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub declared_type: String,
    pub segment: Segment,
    pub index: u16,
}

/// A single-scope symbol table (class-level or subroutine-level).
#[derive(Debug, Default)]
pub struct SymbolTable {
    entries: IndexMap<String, Entry>,
    counters: [u16; 4], // indexed by CounterSlot
}

#[derive(Clone, Copy)]
enum CounterSlot {
    This = 0,
    Static = 1,
    Arg = 2,
    Local = 3,
}

fn counter_slot(segment: Segment) -> Option<CounterSlot> {
    match segment.counted_as() {
        Segment::This => Some(CounterSlot::This),
        Segment::Static => Some(CounterSlot::Static),
        Segment::Arg => Some(CounterSlot::Arg),
        Segment::Local => Some(CounterSlot::Local),
        _ => None,
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines `name` with the given type and segment, assigning it the next
    /// free index for that segment's counter. Redefining an existing name
    /// silently overwrites the old entry — this permits shadowing but does
    /// not itself detect redeclaration bugs; preserved deliberately (see
    /// `DESIGN.md`).
    pub fn define(&mut self, name: &str, declared_type: &str, segment: Segment) {
        let stored_segment = match segment {
            Segment::Field => Segment::This,
            other => other,
        };
        let slot = counter_slot(stored_segment).expect("define() requires a countable segment");
        let index = self.counters[slot as usize];
        self.counters[slot as usize] += 1;
        self.entries.insert(
            name.to_string(),
            Entry {
                declared_type: declared_type.to_string(),
                segment: stored_segment,
                index,
            },
        );
    }

    /// Shorthand for seeding a method's implicit receiver: `define("this", class_name, Arg)`.
    pub fn define_this(&mut self, class_name: &str) {
        self.define("this", class_name, Segment::Arg);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn entry_of(&self, name: &str) -> Option<&Entry> {
        self.entries.get(name)
    }

    pub fn type_of(&self, name: &str) -> Option<&str> {
        self.entry_of(name).map(|e| e.declared_type.as_str())
    }

    pub fn segment_of(&self, name: &str) -> Option<Segment> {
        self.entry_of(name).map(|e| e.segment)
    }

    pub fn index_of(&self, name: &str) -> Option<u16> {
        self.entry_of(name).map(|e| e.index)
    }

    /// The number of entries allocated to `segment` so far.
    pub fn count(&self, segment: Segment) -> u16 {
        match counter_slot(segment) {
            Some(slot) => self.counters[slot as usize],
            None => 0,
        }
    }

    /// Clears all entries and zeroes every counter. Called at the start of
    /// each subroutine declaration.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.counters = [0; 4];
    }

    /// Renders a `debug.txt`-style trace of this table, e.g. `dump("class", &mut out)`.
    pub fn dump(&self, tag: &str, out: &mut impl std::fmt::Write) -> std::fmt::Result {
        writeln!(out, "{}SymbolTable", tag)?;
        for (name, entry) in &self.entries {
            writeln!(
                out,
                "{}: {} {} {}",
                name,
                entry.declared_type,
                entry.segment.vm_name(),
                entry.index
            )?;
        }
        writeln!(out, "------")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_is_stored_and_counted_as_this() {
        let mut table = SymbolTable::new();
        table.define("x", "int", Segment::Field);
        assert_eq!(table.segment_of("x"), Some(Segment::This));
        assert_eq!(table.count(Segment::Field), 1);
        assert_eq!(table.count(Segment::This), 1);
    }

    #[test]
    fn indices_increment_per_segment() {
        let mut table = SymbolTable::new();
        table.define("a", "int", Segment::Arg);
        table.define("b", "int", Segment::Arg);
        table.define("c", "int", Segment::Local);
        assert_eq!(table.index_of("a"), Some(0));
        assert_eq!(table.index_of("b"), Some(1));
        assert_eq!(table.index_of("c"), Some(0));
    }

    #[test]
    fn redefine_overwrites_silently() {
        let mut table = SymbolTable::new();
        table.define("x", "int", Segment::Local);
        table.define("x", "boolean", Segment::Local);
        let entry = table.entry_of("x").unwrap();
        assert_eq!(entry.declared_type, "boolean");
        assert_eq!(entry.index, 1); // counter still advanced, not reused
    }

    #[test]
    fn define_this_seeds_implicit_receiver() {
        let mut table = SymbolTable::new();
        table.define_this("Point");
        assert_eq!(table.type_of("this"), Some("Point"));
        assert_eq!(table.segment_of("this"), Some(Segment::Arg));
        assert_eq!(table.index_of("this"), Some(0));
    }

    #[test]
    fn reset_clears_entries_and_counters() {
        let mut table = SymbolTable::new();
        table.define("x", "int", Segment::Local);
        table.reset();
        assert!(!table.contains("x"));
        assert_eq!(table.count(Segment::Local), 0);
    }

    #[test]
    fn contains_and_missing_lookup() {
        let mut table = SymbolTable::new();
        assert!(!table.contains("x"));
        table.define("x", "int", Segment::Static);
        assert!(table.contains("x"));
        assert_eq!(table.entry_of("y"), None);
    }

    #[test]
    fn dump_formats_tag_entries_and_footer() {
        let mut table = SymbolTable::new();
        table.define("x", "int", Segment::Field);
        let mut out = String::new();
        table.dump("class", &mut out).unwrap();
        assert_eq!(out, "classSymbolTable\nx: int this 0\n------\n");
    }

    #[test]
    fn test_property_indices_are_contiguous_per_segment() {
        use proptest::prelude::*;

        proptest!(|(n in 0usize..30)| {
            let mut table = SymbolTable::new();
            for i in 0..n {
                table.define(&format!("v{i}"), "int", Segment::Local);
            }
            prop_assert_eq!(table.count(Segment::Local), n as u16);
            for i in 0..n {
                prop_assert_eq!(table.index_of(&format!("v{i}")), Some(i as u16));
            }
        });
    }
}
