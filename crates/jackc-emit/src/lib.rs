//! VM Writer: formats and appends individual VM instructions to an in-memory
//! buffer. The textual layout here is load-bearing — downstream VM
//! translators tokenize by whitespace, so leading-tab placement must match
//! exactly: every instruction has a leading tab except `label` and
//! `function`.

use std::fmt::Write as _;

use jackc_sym::Segment;

/// The eight arithmetic/logical VM commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Add,
    Sub,
    Neg,
    Eq,
    Gt,
    Lt,
    And,
    Or,
    Not,
}

impl Command {
    fn as_str(self) -> &'static str {
        match self {
            Command::Add => "add",
            Command::Sub => "sub",
            Command::Neg => "neg",
            Command::Eq => "eq",
            Command::Gt => "gt",
            Command::Lt => "lt",
            Command::And => "and",
            Command::Or => "or",
            Command::Not => "not",
        }
    }
}

/// Accumulates VM text for one compiled class. Generic over nothing — it
/// just owns a `String` buffer, handed off to the driver for writing once
/// compilation of the file succeeds.
#[derive(Debug, Default)]
pub struct VmWriter {
    output: String,
}

impl VmWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_push(&mut self, segment: Segment, index: u16) {
        writeln!(self.output, "\tpush {} {}", segment.vm_name(), index).unwrap();
    }

    pub fn write_pop(&mut self, segment: Segment, index: u16) {
        writeln!(self.output, "\tpop {} {}", segment.vm_name(), index).unwrap();
    }

    pub fn write_arithmetic(&mut self, command: Command) {
        writeln!(self.output, "\t{}", command.as_str()).unwrap();
    }

    pub fn write_label(&mut self, name: &str) {
        writeln!(self.output, "label {}", name).unwrap();
    }

    pub fn write_goto(&mut self, name: &str) {
        writeln!(self.output, "\tgoto {}", name).unwrap();
    }

    pub fn write_if(&mut self, name: &str) {
        writeln!(self.output, "\tif-goto {}", name).unwrap();
    }

    pub fn write_call(&mut self, name: &str, n_args: u16) {
        writeln!(self.output, "\tcall {} {}", name, n_args).unwrap();
    }

    pub fn write_function(&mut self, name: &str, n_locals: u16) {
        writeln!(self.output, "function {} {}", name, n_locals).unwrap();
    }

    pub fn write_return(&mut self) {
        writeln!(self.output, "\treturn").unwrap();
    }

    /// `push constant n`.
    pub fn write_constant(&mut self, n: u16) {
        self.write_push(Segment::Const, n);
    }

    pub fn write_push_this_ptr(&mut self) {
        self.write_push(Segment::Pointer, 0);
    }

    pub fn write_pop_this_ptr(&mut self) {
        self.write_pop(Segment::Pointer, 0);
    }

    pub fn write_push_that_ptr(&mut self) {
        self.write_push(Segment::Pointer, 1);
    }

    pub fn write_pop_that_ptr(&mut self) {
        self.write_pop(Segment::Pointer, 1);
    }

    /// The complete accumulated VM text for this compilation unit.
    pub fn finish(self) -> String {
        self.output
    }

    pub fn as_str(&self) -> &str {
        &self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_pop_have_leading_tab() {
        let mut w = VmWriter::new();
        w.write_push(Segment::Const, 7);
        w.write_pop(Segment::Local, 2);
        assert_eq!(w.finish(), "\tpush constant 7\n\tpop local 2\n");
    }

    #[test]
    fn label_and_function_have_no_leading_tab() {
        let mut w = VmWriter::new();
        w.write_label("LOOP0");
        w.write_function("Main.main", 3);
        assert_eq!(w.finish(), "label LOOP0\nfunction Main.main 3\n");
    }

    #[test]
    fn control_flow_ops_are_tab_prefixed() {
        let mut w = VmWriter::new();
        w.write_goto("L0");
        w.write_if("L1");
        w.write_call("Math.multiply", 2);
        w.write_return();
        assert_eq!(
            w.finish(),
            "\tgoto L0\n\tif-goto L1\n\tcall Math.multiply 2\n\treturn\n"
        );
    }

    #[test]
    fn field_segment_emits_as_this() {
        let mut w = VmWriter::new();
        w.write_push(Segment::Field, 0);
        assert_eq!(w.finish(), "\tpush this 0\n");
    }

    #[test]
    fn pointer_convenience_wrappers() {
        let mut w = VmWriter::new();
        w.write_push_this_ptr();
        w.write_pop_this_ptr();
        w.write_push_that_ptr();
        w.write_pop_that_ptr();
        assert_eq!(
            w.finish(),
            "\tpush pointer 0\n\tpop pointer 0\n\tpush pointer 1\n\tpop pointer 1\n"
        );
    }
}
