use std::io::BufRead;
use crate::domain::{CommentError, FormatEntry, Marker, ScanOutcome};
use crate::ports::CertificateDecoder;
use super::render_annotation;

/// Rewrites one file's worth of lines. Holds only configuration; each `scan` starts from fresh state.
pub struct Scanner<'a, D: CertificateDecoder> {
    decoder: &'a D,
    comment_prefix: &'a str,
    entries: &'a [FormatEntry],
}

#[derive(Default)]
struct ScanState {
    line: usize,
    in_cert: Option<Marker>,
    begin_line: usize,
    padding: Vec<u8>,
    raw_cert: Vec<u8>,
    stripped_cert: Vec<u8>,
    outcome: ScanOutcome,
}

impl ScanState {
    fn push_cert(&mut self, line: &[u8]) {
        self.raw_cert.extend_from_slice(line);
        self.stripped_cert.extend_from_slice(line.strip_prefix(self.padding.as_slice()).unwrap_or(line));
    }

    fn close_block(&mut self) {
        self.raw_cert.clear();
        self.stripped_cert.clear();
        self.padding.clear();
        self.in_cert = None;
        self.outcome.found = true;
    }
}

impl<'a, D: CertificateDecoder> Scanner<'a, D> {
    pub fn new(decoder: &'a D, comment_prefix: &'a str, entries: &'a [FormatEntry]) -> Self {
        Self { decoder, comment_prefix, entries }
    }

    pub fn scan<R: BufRead>(&self, mut reader: R) -> Result<ScanOutcome, CommentError> {
        let mut state = ScanState::default();
        let mut line = Vec::new();

        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            state.line += 1;

            if state.line == 1 && line.contains(&0) {
                return Ok(ScanOutcome { binary: true, ..ScanOutcome::default() });
            }

            state.outcome.source.extend_from_slice(&line);
            self.feed(&mut state, &line)?;
        }

        if state.in_cert.is_some() {
            return Err(CommentError::truncated(format!(
                "certificate starting at line {} has no END marker", state.begin_line
            )));
        }
        Ok(state.outcome)
    }

    fn feed(&self, state: &mut ScanState, line: &[u8]) -> Result<(), CommentError> {
        let trimmed = trim_padding(line);

        match state.in_cert {
            None => {
                if let Some(marker) = Marker::match_begin(trimmed) {
                    state.padding = line[..line.len() - trimmed.len()].to_vec();
                    state.in_cert = Some(marker);
                    state.begin_line = state.line;
                    state.push_cert(line);
                } else if trimmed.starts_with(self.comment_prefix.as_bytes()) {
                    // stale annotation, regenerated above the next block
                } else {
                    state.outcome.output.extend_from_slice(line);
                }
            }
            Some(marker) => {
                state.push_cert(line);
                if marker.is_end(trimmed) {
                    self.emit_block(state)?;
                }
            }
        }
        Ok(())
    }

    fn emit_block(&self, state: &mut ScanState) -> Result<(), CommentError> {
        let at = format!("certificate at line {}", state.begin_line);
        let cert = self.decoder.decode(&state.stripped_cert).map_err(|e| e.context(&at))?;
        let annotation = render_annotation(&cert, self.entries).map_err(|e| e.context(&at))?;

        let out = &mut state.outcome.output;
        out.extend_from_slice(&state.padding);
        out.extend_from_slice(self.comment_prefix.as_bytes());
        out.extend_from_slice(annotation.as_bytes());
        out.push(b'\n');
        out.extend_from_slice(&state.raw_cert);

        state.close_block();
        Ok(())
    }
}

fn trim_padding(line: &[u8]) -> &[u8] {
    let start = line.iter().position(|b| *b != b' ' && *b != b'\t').unwrap_or(line.len());
    &line[start..]
}
