//! Renders tree diagnostics against their source text.

use std::fmt::Display;

pub use annotate_snippets::Renderer;
use annotate_snippets::{Level, Snippet};
use lira_syntax::{Severity, SourceDiagnostic};
pub use text_size::TextRange;

pub trait RenderDiagnostic {
    fn render<'a>(
        &'a self,
        renderer: &'a Renderer,
        path: &'a str,
        text: &'a str,
    ) -> impl Display + 'a;
}

impl RenderDiagnostic for SourceDiagnostic {
    fn render<'a>(
        &'a self,
        renderer: &'a Renderer,
        path: &'a str,
        text: &'a str,
    ) -> impl Display + 'a {
        let level = match self.severity() {
            Severity::Error => Level::Error,
            Severity::Warning => Level::Warning,
        };
        let message = level.title(self.message()).snippet(
            Snippet::source(text)
                .origin(path)
                .annotation(level.span(self.range().into()).label("here"))
                .fold(true),
        );
        renderer.render(message)
    }
}

#[cfg(test)]
mod tests {
    use lira_syntax::SyntaxKind::*;
    use lira_syntax::{Builder, Diagnostic, SyntaxTree, TriviaPiece, TriviaPieceKind};

    use super::*;

    fn space() -> [TriviaPiece; 1] {
        [TriviaPiece::new(TriviaPieceKind::Whitespace, 1.into())]
    }

    #[test]
    fn renders_a_missing_token() {
        let text = "x = ";
        let mut builder = Builder::new();
        builder.start_node(ASSIGN_STMT);
        builder.start_node(NAME_REF);
        builder.token(&[], NAME, "x ", &space());
        builder.finish_node();
        builder.token(&[], EQ, "= ", &space());
        builder.start_node(NAME_REF);
        builder.missing(NAME, Diagnostic::error("expected an expression"));
        builder.finish_node();
        builder.finish_node();
        let tree = SyntaxTree::new(builder.finish());

        let diagnostics = tree.diagnostics();
        assert_eq!(diagnostics.len(), 1);

        let renderer = Renderer::plain();
        let rendered = diagnostics[0].render(&renderer, "demo.lira", text).to_string();
        assert!(rendered.contains("expected an expression"));
        assert!(rendered.contains("demo.lira"));
    }
}
