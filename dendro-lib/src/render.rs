// --- FILE: dendro-lib/src/render.rs ---

use crate::symbols::{SymbolSet, LAST_INDENT};

/// Append-only line emitter for one full render.
///
/// The renderer owns the output buffer for the entire run, across every root.
/// Whether the buffer is still empty decides the corner-down prefix, so only
/// the first line of the whole output can ever receive it.
#[derive(Debug)]
pub(crate) struct TreeRenderer {
    symbols: SymbolSet,
    buffer: Vec<u8>,
}

impl TreeRenderer {
    pub(crate) fn new(symbols: SymbolSet) -> Self {
        Self {
            symbols,
            buffer: Vec::new(),
        }
    }

    /// Writes the label of a traversal root: `name/`.
    pub(crate) fn root_line(&mut self, name: &str) {
        self.buffer.extend_from_slice(name.as_bytes());
        self.buffer.extend_from_slice(b"/\n");
    }

    /// Writes one entry line: indent, sibling prefix, name, `/` for directories.
    pub(crate) fn entry_line(&mut self, indent: &[u8], is_last: bool, name: &str, is_dir: bool) {
        let prefix = self.prefix(is_last);
        self.buffer.extend_from_slice(indent);
        self.buffer.extend_from_slice(prefix);
        self.buffer.extend_from_slice(name.as_bytes());
        if is_dir {
            self.buffer.push(b'/');
        }
        self.buffer.push(b'\n');
    }

    fn prefix(&self, is_last: bool) -> &'static [u8] {
        if is_last {
            self.symbols.corner_up
        } else if self.buffer.is_empty() {
            self.symbols.corner_down
        } else {
            self.symbols.branch
        }
    }

    /// Indent for the children of an entry drawn at `indent`.
    pub(crate) fn child_indent(&self, indent: &[u8], is_last: bool) -> Vec<u8> {
        let continuation = if is_last {
            LAST_INDENT
        } else {
            self.symbols.vertical
        };
        let mut next = Vec::with_capacity(indent.len() + continuation.len());
        next.extend_from_slice(indent);
        next.extend_from_slice(continuation);
        next
    }

    pub(crate) fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }
}
