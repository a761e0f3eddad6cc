//! Tantivy adapter for the analysis pipeline.
//!
//! Tantivy drives analysis through its own `Tokenizer`/`TokenStream` traits.
//! [`PipelineTokenizer`] forwards to [`Pipeline::tokens`] so that documents
//! and queries are analyzed by exactly the same stages.

use std::sync::Arc;

use rofts_analysis::Pipeline;
use rofts_analysis::pipeline::Tokens;
use tantivy::tokenizer::{Token, TokenStream, Tokenizer};

/// Tokenizer that runs the full analysis pipeline.
#[derive(Clone)]
pub struct PipelineTokenizer {
    pipeline: Arc<Pipeline>,
}

impl PipelineTokenizer {
    /// Wrap a shared pipeline.
    pub fn new(pipeline: Arc<Pipeline>) -> Self {
        Self { pipeline }
    }
}

impl Tokenizer for PipelineTokenizer {
    type TokenStream<'a> = PipelineTokenStream<'a>;

    fn token_stream<'a>(&'a mut self, text: &'a str) -> Self::TokenStream<'a> {
        PipelineTokenStream {
            tokens: self.pipeline.tokens(text),
            token: Token::default(),
        }
    }
}

/// Token stream produced by [`PipelineTokenizer`].
pub struct PipelineTokenStream<'a> {
    tokens: Tokens<'a>,
    token: Token,
}

impl TokenStream for PipelineTokenStream<'_> {
    fn advance(&mut self) -> bool {
        match self.tokens.next() {
            Some(analyzed) => {
                self.token.text = analyzed.term;
                self.token.offset_from = analyzed.offset_from;
                self.token.offset_to = analyzed.offset_to;
                self.token.position = analyzed.position;
                self.token.position_length = 1;
                true
            }
            None => false,
        }
    }

    fn token(&self) -> &Token {
        &self.token
    }

    fn token_mut(&mut self) -> &mut Token {
        &mut self.token
    }
}
