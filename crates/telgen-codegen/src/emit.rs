//! # TypeScript Emitter
//!
//! The only module that knows the target syntax. It walks the declaration
//! list once and writes each item in turn.
//!
//! Output conventions: a generated-file banner, 4-space indentation,
//! single-quoted strings, no semicolons, one blank line between top-level
//! declarations, and a trailing newline.

use telgen_core::{is_identifier, quote_literal};

use crate::accessor::AccessorTable;
use crate::decl::{
    Declaration, Interface, UnionAlias, DEFINITIONS_CONST_NAME, DEFINITION_SHAPE_NAME,
    METADATA_OVERRIDE_NAME, NAME_UNION_NAME, RECORDER_NAME, SHAPE_MAP_NAME, SPAN_NAME,
};
use crate::table::RuntimeTable;

/// Banner written at the top of every generated file.
pub const BANNER: &str = "\
// This file is generated by telgen from telemetry definition documents.
// Do not edit it by hand; change the definitions and regenerate instead.";

const INDENT: &str = "    ";

/// Render declarations, in order, as one source file.
pub fn render(declarations: &[Declaration]) -> String {
    let mut w = SourceWriter::default();
    w.raw(BANNER);
    for decl in declarations {
        w.blank();
        match decl {
            Declaration::Interface(iface) => write_interface(&mut w, iface),
            Declaration::Union(union) => write_union(&mut w, union),
            Declaration::DefinitionShape => write_definition_shape(&mut w),
            Declaration::ShapeMap { entries } => write_shape_map(&mut w, entries),
            Declaration::NameUnion => {
                w.doc(Some("Name of any defined metric"), false);
                w.line(&format!("export type {NAME_UNION_NAME} = keyof {SHAPE_MAP_NAME}"));
            }
            Declaration::DefinitionsTable(table) => write_definitions(&mut w, table),
            Declaration::MetadataOverride { base, overridable } => {
                write_metadata_override(&mut w, base, overridable)
            }
            Declaration::Span { base } => write_span(&mut w, base),
            Declaration::Recorder { base } => write_recorder(&mut w, base),
            Declaration::AccessorBase(table) => write_accessor_base(&mut w, table),
        }
    }
    w.finish()
}

/// A property key: bare when it is an identifier, quoted otherwise.
fn key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        quote_literal(name)
    }
}

/// Line-oriented writer tracking the current indentation depth.
#[derive(Default)]
struct SourceWriter {
    out: String,
    depth: usize,
}

impl SourceWriter {
    fn raw(&mut self, text: &str) {
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn open(&mut self, header: &str) {
        self.line(&format!("{header} {{"));
        self.depth += 1;
    }

    fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.line("}");
    }

    /// Doc comment, single-line when it fits on one line.
    fn doc(&mut self, text: Option<&str>, deprecated: bool) {
        let text = text.map(str::trim).filter(|t| !t.is_empty());
        let lines: Vec<String> = text
            .map(|t| t.lines().map(|l| l.trim_end().replace("*/", "*\\/")).collect())
            .unwrap_or_default();

        match (lines.as_slice(), deprecated) {
            ([], false) => {}
            ([], true) => self.line("/** @deprecated */"),
            ([only], false) => self.line(&format!("/** {only} */")),
            (lines, _) => {
                self.line("/**");
                for l in lines {
                    if l.is_empty() {
                        self.line(" *");
                    } else {
                        self.line(&format!(" * {l}"));
                    }
                }
                if deprecated {
                    self.line(" * @deprecated");
                }
                self.line(" */");
            }
        }
    }

    fn finish(self) -> String {
        self.out
    }
}

fn write_interface(w: &mut SourceWriter, iface: &Interface) {
    w.doc(iface.doc.as_deref(), false);
    let header = match &iface.extends {
        Some(base) => format!("export interface {} extends {base}", iface.name),
        None => format!("export interface {}", iface.name),
    };
    if iface.fields.is_empty() {
        w.line(&format!("{header} {{}}"));
        return;
    }
    w.open(&header);
    for field in &iface.fields {
        w.doc(field.doc.as_deref(), field.deprecated);
        let marker = if field.optional { "?" } else { "" };
        w.line(&format!("readonly {}{marker}: {}", key(&field.name), field.ty));
    }
    w.close();
}

fn write_union(w: &mut SourceWriter, union: &UnionAlias) {
    let members: Vec<String> = union.literals.iter().map(|l| quote_literal(l)).collect();
    w.line(&format!("export type {} = {}", union.name, members.join(" | ")));
}

fn write_definition_shape(w: &mut SourceWriter) {
    w.doc(Some("Runtime description of one metric"), false);
    w.open(&format!("export interface {DEFINITION_SHAPE_NAME}"));
    w.line("readonly unit: string");
    w.line("readonly passive: boolean");
    w.line("readonly trackPerformance: boolean");
    w.line("readonly requiredMetadata: readonly string[]");
    w.close();
}

fn write_shape_map(w: &mut SourceWriter, entries: &[(String, String)]) {
    w.doc(Some("Metric type of every metric, keyed by metric name"), false);
    let header = format!("export interface {SHAPE_MAP_NAME}");
    if entries.is_empty() {
        w.line(&format!("{header} {{}}"));
        return;
    }
    w.open(&header);
    for (metric, shape) in entries {
        w.line(&format!("readonly {}: {shape}", key(metric)));
    }
    w.close();
}

fn write_definitions(w: &mut SourceWriter, table: &RuntimeTable) {
    let header =
        format!("export const {DEFINITIONS_CONST_NAME}: Record<string, {DEFINITION_SHAPE_NAME}> =");
    if table.is_empty() {
        w.line(&format!("{header} {{}}"));
        return;
    }
    w.open(&header);
    for (name, record) in table.iter() {
        let required: Vec<String> = record
            .required_metadata
            .iter()
            .map(|r| quote_literal(r))
            .collect();
        w.line(&format!(
            "{}: {{ unit: {}, passive: {}, trackPerformance: {}, requiredMetadata: [{}] }},",
            key(name),
            quote_literal(&record.unit),
            record.passive,
            record.track_performance,
            required.join(", "),
        ));
    }
    w.close();
}

fn write_metadata_override(w: &mut SourceWriter, base: &str, overridable: &[String]) {
    w.doc(Some("Metadata a caller may pass when recording an instance of `T`"), false);
    let specific = format!("Omit<T, keyof {base}>");
    let body = if overridable.is_empty() {
        specific
    } else {
        let picked: Vec<String> = overridable.iter().map(|o| quote_literal(o)).collect();
        format!("{specific} & Pick<{base}, {}>", picked.join(" | "))
    };
    w.line(&format!(
        "export type {METADATA_OVERRIDE_NAME}<T extends {base}> = Partial<{body}>"
    ));
}

fn write_span(w: &mut SourceWriter, base: &str) {
    w.doc(Some("Accumulates metadata inside an instrumented callback"), false);
    w.open(&format!("export interface {SPAN_NAME}<T extends {base} = {base}>"));
    w.line("record(data: Partial<T>): this");
    w.close();
}

fn write_recorder(w: &mut SourceWriter, base: &str) {
    w.doc(Some("Records instances of one metric"), false);
    w.open(&format!("export interface {RECORDER_NAME}<T extends {base} = {base}>"));
    w.line("readonly name: string");
    w.doc(Some("Records one instance of the metric immediately"), false);
    w.line("emit(data?: T): void");
    w.doc(
        Some("Calls `fn` and records the metric once it returns or throws"),
        false,
    );
    w.line(&format!("run<U>(fn: (span: {SPAN_NAME}<T>) => U): U"));
    w.close();
}

fn write_accessor_base(w: &mut SourceWriter, table: &AccessorTable) {
    w.open(&format!("export abstract class {}", table.class_name));
    for accessor in &table.accessors {
        w.doc(Some(&accessor.doc), false);
        w.open(&format!(
            "public get {}(): {RECORDER_NAME}<{}>",
            key(&accessor.metric),
            accessor.shape
        ));
        w.line(&format!("return this.getMetric({})", quote_literal(&accessor.metric)));
        w.close();
        w.blank();
    }
    w.line(&format!("protected abstract getMetric(name: string): {RECORDER_NAME}"));
    w.close();
}
