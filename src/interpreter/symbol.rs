use std::rc::Rc;

use rustc_hash::FxHashMap;

/// An interned identifier or string literal.
///
/// Two symbols are equal exactly when they were produced by interning equal
/// text in the same [`SymbolTable`]. Every name comparison in the interpreter
/// (variables, functions, members, parameters) is a comparison of symbols,
/// never of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(usize);

impl Symbol {
    /// The empty string, pre-interned by every table.
    pub const EMPTY: Self = Self(0);
}

/// Process-wide string pool handing out one [`Symbol`] per distinct text.
///
/// Interning is idempotent and there is no removal, so a symbol stays valid
/// for as long as its table lives.
///
/// # Example
/// ```
/// use entity::interpreter::symbol::SymbolTable;
///
/// let mut symbols = SymbolTable::new();
/// let a = symbols.intern("total");
/// let b = symbols.intern("total");
///
/// assert_eq!(a, b);
/// assert_eq!(symbols.resolve(a), "total");
/// ```
#[derive(Debug)]
pub struct SymbolTable {
    map:     FxHashMap<Rc<str>, Symbol>,
    strings: Vec<Rc<str>>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    /// Creates a table that already holds the empty string as
    /// [`Symbol::EMPTY`].
    #[must_use]
    pub fn new() -> Self {
        let mut table = Self { map:     FxHashMap::default(),
                               strings: Vec::with_capacity(64), };
        table.intern("");
        table
    }

    /// Returns the symbol for `text`, adding it to the pool on first sight.
    pub fn intern(&mut self, text: &str) -> Symbol {
        if let Some(symbol) = self.map.get(text) {
            return *symbol;
        }

        let symbol = Symbol(self.strings.len());
        let text: Rc<str> = Rc::from(text);
        self.strings.push(Rc::clone(&text));
        self.map.insert(text, symbol);
        symbol
    }

    /// Looks up the symbol for `text` without interning it.
    #[must_use]
    pub fn get(&self, text: &str) -> Option<Symbol> {
        self.map.get(text).copied()
    }

    /// Returns the text a symbol was interned from.
    ///
    /// Symbols from a different table resolve to the empty string.
    #[must_use]
    pub fn resolve(&self, symbol: Symbol) -> &str {
        self.strings.get(symbol.0).map_or("", |text| text)
    }

    /// Number of distinct strings in the pool, the empty string included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Always `false`: the empty string is interned on construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}
