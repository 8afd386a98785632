//! Builder-pattern printer for rendering diagnostics.

use std::fmt::Write;
use std::ops::Range;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};

use super::Diagnostics;
use super::SourceFile;
use super::message::Severity;

/// Builder for rendering diagnostics with various options.
pub struct DiagnosticsPrinter<'d, 's> {
    diagnostics: &'d Diagnostics,
    sources: Option<&'s [SourceFile]>,
    colored: bool,
    filtered: bool,
}

impl<'d, 's> DiagnosticsPrinter<'d, 's> {
    pub fn new(diagnostics: &'d Diagnostics) -> Self {
        Self {
            diagnostics,
            sources: None,
            colored: false,
            filtered: true,
        }
    }

    /// Files that the diagnostics' `FileId`s index into.
    pub fn sources(mut self, sources: &'s [SourceFile]) -> Self {
        self.sources = Some(sources);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    /// Whether to drop diagnostics caused by earlier syntax errors.
    pub fn filtered(mut self, value: bool) -> Self {
        self.filtered = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let messages = if self.filtered {
            self.diagnostics.filtered()
        } else {
            self.diagnostics.iter().cloned().collect()
        };

        let Some(sources) = self.sources else {
            for (i, diag) in messages.iter().enumerate() {
                if i > 0 {
                    w.write_char('\n')?;
                }
                write!(w, "{}", diag)?;
            }
            return Ok(());
        };

        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        for (i, diag) in messages.iter().enumerate() {
            if i > 0 {
                w.write_char('\n')?;
            }

            let Some(file) = sources.get(diag.file.index()) else {
                write!(w, "{}", diag)?;
                continue;
            };
            let path = file.path.to_string_lossy();
            let range = adjust_range(&diag.range, file.text.len());

            let mut snippet = Snippet::source(file.text.as_str())
                .line_start(1)
                .path(&*path)
                .annotation(AnnotationKind::Primary.span(range).label(&diag.message));

            for related in diag.related.iter().filter(|r| r.file == diag.file) {
                snippet = snippet.annotation(
                    AnnotationKind::Context
                        .span(adjust_range(&related.range, file.text.len()))
                        .label(&related.message),
                );
            }

            let mut group = severity_to_level(diag.severity())
                .primary_title(&diag.message)
                .element(snippet);
            for hint in &diag.hints {
                group = group.element(Level::HELP.message(hint));
            }

            let report: Vec<Group> = vec![group];
            write!(w, "{}", renderer.render(&report))?;
        }

        Ok(())
    }
}

fn severity_to_level(severity: Severity) -> Level<'static> {
    match severity {
        Severity::Error => Level::ERROR,
        Severity::Warning => Level::WARNING,
    }
}

fn adjust_range(range: &Range<usize>, limit: usize) -> Range<usize> {
    if range.start == range.end {
        return range.start..(range.start + 1).min(limit);
    }
    range.clone()
}

impl Diagnostics {
    pub fn printer(&self) -> DiagnosticsPrinter<'_, '_> {
        DiagnosticsPrinter::new(self)
    }
}
