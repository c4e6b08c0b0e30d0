//! Editing session: the netlist, its file, and the device it is mirrored to.

use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::circuit::{Edit, Netlist};
use crate::device::NetlistSink;
use crate::dsl;
use crate::error::{BridgeError, Result};
use crate::storage;

/// File name used by `save` when the session has none yet.
pub const DEFAULT_FILE_NAME: &str = "default";

/// A single-writer editing session.
///
/// Lines are applied in two phases: every directive is parsed and expanded
/// first, and only if all of them are valid are the edits applied and the
/// full netlist pushed to the sink.
pub struct Session<S: NetlistSink> {
    netlist: Netlist,
    current_file: Option<String>,
    storage_dir: PathBuf,
    sink: S,
}

impl<S: NetlistSink> Session<S> {
    /// Create a session with an empty netlist, storing files in the working directory.
    pub fn new(sink: S) -> Self {
        Self {
            netlist: Netlist::new(),
            current_file: None,
            storage_dir: PathBuf::from("."),
            sink,
        }
    }

    /// Set the directory netlist files are saved to and loaded from.
    pub fn with_storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = dir.into();
        self
    }

    /// Start from an existing netlist instead of an empty one. Nothing is pushed.
    pub fn with_netlist(mut self, netlist: Netlist) -> Self {
        self.netlist = netlist;
        self
    }

    /// The current netlist.
    pub fn netlist(&self) -> &Netlist {
        &self.netlist
    }

    /// Name of the file last saved or loaded, if any.
    pub fn current_file(&self) -> Option<&str> {
        self.current_file.as_deref()
    }

    /// The device sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Apply one line of directives and push the result.
    ///
    /// Returns the edits that were applied. If any directive is invalid the
    /// netlist is left untouched, nothing is pushed, and the error lists every
    /// failing directive. A blank line applies and pushes nothing.
    pub fn process_line(&mut self, line: &str) -> Result<Vec<Edit>> {
        let edits = dsl::parse_line(line).map_err(|err| {
            warn!(line, error = %err, "rejected line");
            err
        })?;

        if edits.is_empty() {
            return Ok(edits);
        }

        self.netlist.apply_all(edits.iter().cloned());
        debug!(edits = edits.len(), bridges = self.netlist.len(), "applied line");
        self.sink.push(&self.netlist)?;
        Ok(edits)
    }

    /// Push the current netlist again without changing it.
    pub fn push(&mut self) -> Result<()> {
        self.sink.push(&self.netlist)
    }

    /// Remove every bridge from the device and the netlist, and forget the current file.
    pub fn clear(&mut self) -> Result<()> {
        self.sink.clear()?;
        self.netlist.clear();
        self.current_file = None;
        info!("cleared netlist");
        Ok(())
    }

    /// Put the device into flashing mode and release it.
    pub fn begin_flash(&mut self) -> Result<()> {
        info!("entering flash mode");
        self.sink.enter_maintenance()
    }

    /// Reacquire the device after flashing and restore the netlist on it.
    pub fn finish_flash(&mut self) -> Result<()> {
        self.sink.resume()?;
        info!("leaving flash mode");
        self.sink.push(&self.netlist)
    }

    /// Save the netlist.
    ///
    /// Without a name the current file is reused, or [`DEFAULT_FILE_NAME`]
    /// when there is none. An empty netlist is not saved.
    pub fn save(&mut self, name: Option<&str>) -> Result<PathBuf> {
        if self.netlist.is_empty() {
            return Err(BridgeError::NothingToSave);
        }
        let name = name
            .or(self.current_file.as_deref())
            .unwrap_or(DEFAULT_FILE_NAME)
            .to_string();
        let path = storage::save_netlist(&self.storage_dir, &name, &self.netlist)?;
        self.current_file = Some(name);
        Ok(path)
    }

    /// Replace the netlist with the contents of a file and push it.
    ///
    /// On any file error the session is left unchanged.
    pub fn load(&mut self, name: &str) -> Result<()> {
        let netlist = storage::load_netlist(&self.storage_dir, name)?;
        self.netlist.replace(netlist);
        self.current_file = Some(name.to_string());
        self.sink.push(&self.netlist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{Edge, Label};
    use crate::device::{RecordingSink, CLEAR_COMMAND, FLASH_MODE_COMMAND};

    fn session() -> Session<RecordingSink> {
        Session::new(RecordingSink::new())
    }

    fn l(s: &str) -> Label {
        Label::parse(s).unwrap()
    }

    fn edges(session: &Session<RecordingSink>) -> Vec<String> {
        session.netlist().edges().map(Edge::to_string).collect()
    }

    #[test]
    fn test_direct_edge_is_idempotent() {
        let mut s = session();
        s.process_line("a-b").unwrap();
        s.process_line("a-b").unwrap();
        s.process_line("B-A").unwrap();
        assert_eq!(edges(&s), vec!["a-b"]);
        assert_eq!(s.sink().commands().len(), 3);
        assert_eq!(s.sink().last_command(), Some("::bridgelist[a-b]"));
    }

    #[test]
    fn test_increment_skip() {
        let mut s = session();
        s.process_line("1++(10,20,x,40)").unwrap();
        assert_eq!(edges(&s), vec!["1-10", "2-20", "4-40"]);
        assert!(s.netlist().neighbors(&l("3")).is_empty());
    }

    #[test]
    fn test_increment_empty_is_rejected() {
        let mut s = session();
        let err = s.process_line("1++()").unwrap_err();
        assert!(matches!(err.directive_errors()[0], BridgeError::EmptyExpansion { .. }));
        assert!(s.netlist().is_empty());
        assert!(s.sink().commands().is_empty());
    }

    #[test]
    fn test_chain_series() {
        let mut s = session();
        s.process_line("VCC-1-2-3-4").unwrap();
        assert_eq!(s.netlist().len(), 4);
        for (a, b) in [("5v", "1"), ("1", "2"), ("2", "3"), ("3", "4")] {
            assert!(s.netlist().contains(&l(a), &l(b)));
        }
    }

    #[test]
    fn test_vcc_alias() {
        let mut a = session();
        let mut b = session();
        a.process_line("vcc-1").unwrap();
        b.process_line("5v-1").unwrap();
        assert_eq!(a.netlist(), b.netlist());
    }

    #[test]
    fn test_removal_reconnects_neighbors() {
        let mut s = session();
        s.process_line("a-x,x-b").unwrap();
        s.process_line("-x").unwrap();
        assert_eq!(edges(&s), vec!["a-b"]);
    }

    #[test]
    fn test_removal_leaf_and_isolated() {
        let mut s = session();
        s.process_line("1-2,3-4").unwrap();
        s.process_line("-2").unwrap();
        assert_eq!(edges(&s), vec!["3-4"]);
        s.process_line("-9").unwrap();
        assert_eq!(edges(&s), vec!["3-4"]);
    }

    #[test]
    fn test_directives_in_line_apply_in_order() {
        let mut s = session();
        s.process_line("5-30,20-10").unwrap();
        s.process_line("-20,20-40").unwrap();
        assert_eq!(edges(&s), vec!["20-40", "30-5"]);
        // One push per line
        assert_eq!(s.sink().commands().len(), 2);
    }

    #[test]
    fn test_invalid_directive_discards_whole_line() {
        let mut s = session();
        s.process_line("1-2").unwrap();
        let before = s.netlist().clone();

        let err = s.process_line("3-4,oops!").unwrap_err();
        assert!(matches!(err, BridgeError::InvalidLine { .. }));
        // No push for the rejected line
        assert_eq!(s.sink().commands().len(), 1);
        // Stricter than applying valid directives before the bad one: the graph is unchanged
        assert_eq!(s.netlist(), &before);
    }

    #[test]
    fn test_with_netlist_then_push() {
        let netlist = Netlist::from_edges([Edge::parse("a-b").unwrap()]);
        let mut s = session().with_netlist(netlist);
        assert!(s.sink().commands().is_empty());
        s.push().unwrap();
        assert_eq!(s.sink().last_command(), Some("::bridgelist[a-b]"));
    }

    #[test]
    fn test_blank_line_does_nothing() {
        let mut s = session();
        assert!(s.process_line("   ").unwrap().is_empty());
        assert!(s.sink().commands().is_empty());
    }

    #[test]
    fn test_blank_trailing_directive_is_rejected() {
        let mut s = session();
        let err = s.process_line("1-2, ").unwrap_err();
        assert!(matches!(err.directive_errors()[0], BridgeError::InvalidDirective { .. }));
        assert!(s.netlist().is_empty());
        assert!(s.sink().commands().is_empty());
    }

    #[test]
    fn test_clear_resets_context() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session().with_storage_dir(dir.path());
        s.process_line("1-2").unwrap();
        s.save(Some("board")).unwrap();
        s.clear().unwrap();
        assert!(s.netlist().is_empty());
        assert_eq!(s.current_file(), None);
        assert_eq!(s.sink().last_command(), Some(CLEAR_COMMAND));
    }

    #[test]
    fn test_flash_restores_netlist() {
        let mut s = session();
        s.process_line("1-2").unwrap();
        s.begin_flash().unwrap();
        assert_eq!(s.sink().last_command(), Some(FLASH_MODE_COMMAND));
        // The edit lands in the netlist; the device catches up on resume
        assert!(s.process_line("3-4").is_err());
        s.finish_flash().unwrap();
        assert!(!s.sink().in_maintenance());
        assert_eq!(s.sink().last_command(), Some("::bridgelist[1-2,3-4]"));
    }

    #[test]
    fn test_save_names() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session().with_storage_dir(dir.path());
        assert!(matches!(s.save(None), Err(BridgeError::NothingToSave)));

        s.process_line("1-2").unwrap();
        assert_eq!(s.save(None).unwrap(), dir.path().join("default.json"));
        assert_eq!(s.current_file(), Some(DEFAULT_FILE_NAME));

        s.save(Some("amp")).unwrap();
        s.process_line("2-3").unwrap();
        assert_eq!(s.save(None).unwrap(), dir.path().join("amp.json"));
    }

    #[test]
    fn test_load_replaces_and_pushes() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session().with_storage_dir(dir.path());
        s.process_line("1-2").unwrap();
        s.save(Some("first")).unwrap();
        s.clear().unwrap();

        s.process_line("7-8").unwrap();
        s.load("first").unwrap();
        assert_eq!(edges(&s), vec!["1-2"]);
        assert_eq!(s.current_file(), Some("first"));
        assert_eq!(s.sink().last_command(), Some("::bridgelist[1-2]"));
    }

    #[test]
    fn test_failed_load_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad.json"), "[1, 2]").unwrap();
        let mut s = session().with_storage_dir(dir.path());
        s.process_line("1-2").unwrap();
        let pushes = s.sink().commands().len();

        assert!(matches!(s.load("bad"), Err(BridgeError::MalformedFile { .. })));
        assert!(matches!(s.load("missing"), Err(BridgeError::FileNotFound { .. })));
        assert_eq!(edges(&s), vec!["1-2"]);
        assert_eq!(s.current_file(), None);
        assert_eq!(s.sink().commands().len(), pushes);
    }
}
