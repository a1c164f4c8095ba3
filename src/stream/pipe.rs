//! Blocking reader adapter.
//!
//! Drives a [`UrlRewriteStream`] from any [`std::io::Read`]: reads a buffer at
//! a time, pushes each read, and finishes at end of input.
//!
//! # Example
//!
//! ```no_run
//! use std::fs::File;
//! use std::io;
//! use cssurl::{map_urls, UrlRewriteStream, WriteSink};
//!
//! fn main() -> Result<(), cssurl::StreamError> {
//!     let input = File::open("style.css")?;
//!     let replacer = map_urls(|url| format!("/static/{url}"));
//!     let mut stream = UrlRewriteStream::new(replacer, WriteSink::new(io::stdout().lock()));
//!
//!     stream.pipe(input)?;
//!     for err in stream.sink().errors() {
//!         eprintln!("warning: {err}");
//!     }
//!     Ok(())
//! }
//! ```

use std::io::{ErrorKind, Read};

use bytes::Bytes;

use crate::buffer::ReadBuffer;
use crate::error::{BatchError, StreamError};
use crate::rewrite::{Replacer, Rewrite};
use crate::stream::engine::UrlRewriteStream;
use crate::stream::sink::{Collector, Sink};

impl<P, S, W> UrlRewriteStream<P, S, W>
where
    P: Replacer,
    S: Sink,
    W: Rewrite + Default,
{
    /// Reads `reader` to the end, pushing every read, then finishes the stream.
    ///
    /// Reads are `config().read_buffer_size()` bytes at most. Interrupted
    /// reads are retried. Returns the number of bytes read.
    ///
    /// # Errors
    ///
    /// - [`StreamError::Io`] if a read fails; the stream is left unfinished
    /// - anything `push()` or `finish()` return
    pub fn pipe<R: Read>(&mut self, mut reader: R) -> Result<u64, StreamError> {
        let mut buffer = ReadBuffer::take(self.config().read_buffer_size());
        let mut total = 0u64;

        loop {
            let n = match reader.read(buffer.as_mut_slice()) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            total += n as u64;
            self.push(Bytes::copy_from_slice(buffer.filled(n)))?;
        }

        self.finish()?;
        Ok(total)
    }
}

/// Rewrites an in-memory string in one go.
///
/// Returns the concatenated output and the failures, in order. Lines from
/// failed batches are missing from the output.
///
/// # Example
///
/// ```
/// use cssurl::{map_urls, rewrite_str};
///
/// let (out, errors) = rewrite_str("url(a.png)\n", map_urls(|url| url.replace("a.png", "b.png")));
/// assert_eq!(out, "url(b.png)\n");
/// assert!(errors.is_empty());
/// ```
pub fn rewrite_str<P: Replacer>(text: &str, replacer: P) -> (String, Vec<BatchError>) {
    let mut sink = Collector::default();
    let mut stream = UrlRewriteStream::new(replacer, &mut sink);

    // A fresh stream over an in-memory sink cannot fail.
    match stream
        .push(Bytes::copy_from_slice(text.as_bytes()))
        .and_then(|()| stream.finish())
    {
        Ok(()) => {}
        Err(e) => unreachable!("in-memory rewrite failed: {e}"),
    }

    (sink.concat(), sink.errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RewriteConfig;
    use crate::rewrite::map_urls;
    use crate::stream::sink::WriteSink;
    use std::io::{self, Cursor};

    /// Reader returning at most `step` bytes per read, interrupting every other call.
    struct Trickle<'a> {
        data: &'a [u8],
        step: usize,
        interrupt: bool,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.interrupt = !self.interrupt;
            if self.interrupt {
                return Err(io::Error::from(ErrorKind::Interrupted));
            }
            let n = self.step.min(buf.len()).min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[test]
    fn test_pipe_to_writer() {
        let input = "a{background:url(a.png)}\nb{color:red}\nc{background:url(c.png)}";
        let replacer = map_urls(|url| format!("/s/{url}"));
        let mut stream = UrlRewriteStream::new(replacer, WriteSink::new(Vec::new()));

        let read = stream.pipe(Cursor::new(input)).unwrap();
        assert_eq!(read, input.len() as u64);

        let out = String::from_utf8(stream.into_sink().into_inner()).unwrap();
        assert_eq!(
            out,
            "a{background:url(/s/a.png)}\nb{color:red}\nc{background:url(/s/c.png)}"
        );
    }

    #[test]
    fn test_pipe_small_reads_and_interrupts() {
        let input = b"url(one.png)\nurl(two.png)\n";
        let reader = Trickle {
            data: input,
            step: 5,
            interrupt: false,
        };
        let config = RewriteConfig::default().with_read_buffer_size(3);
        let mut stream =
            UrlRewriteStream::with_config(map_urls(str::to_owned), Collector::default(), config)
                .unwrap();

        stream.pipe(reader).unwrap();
        let sink = stream.into_sink();
        assert_eq!(sink.concat().as_bytes(), input);
        assert_eq!(sink.output, ["url(one.png)\n", "url(two.png)\n"]);
    }

    #[test]
    fn test_pipe_read_error() {
        struct Failing;

        impl Read for Failing {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::other("connection reset"))
            }
        }

        let mut stream = UrlRewriteStream::new(map_urls(str::to_owned), Collector::default());
        let err = stream.pipe(Failing).unwrap_err();
        assert!(matches!(err, StreamError::Io(_)));
    }

    #[test]
    fn test_rewrite_str() {
        let (out, errors) = rewrite_str(
            "a{background:url(a.png)}\nb{color:red}\n",
            map_urls(|url| url.replace("a.png", "b.png")),
        );
        assert_eq!(out, "a{background:url(b.png)}\nb{color:red}\n");
        assert!(errors.is_empty());
    }
}
