use crate::{error::KlineError, models::kline::Candle};
use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::Path,
};

/// Write candles as newline-delimited JSON, truncating `path`.
///
/// Not atomic: on error whatever was already flushed stays on disk.
pub fn write_candles(candles: &[Candle], path: impl AsRef<Path>) -> Result<(), KlineError> {
    let path = path.as_ref();
    let write_err = |source: io::Error| KlineError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);

    for candle in candles {
        serde_json::to_writer(&mut writer, candle).map_err(|err| write_err(err.into()))?;
        writer.write_all(b"\n").map_err(write_err)?;
    }

    writer.flush().map_err(write_err)?;
    tracing::debug!(count = candles.len(), path = %path.display(), "wrote candles");
    Ok(())
}

/// Load candles previously written by [`write_candles`]. Blank lines are skipped.
pub fn read_candles(path: impl AsRef<Path>) -> Result<Vec<Candle>, KlineError> {
    let path = path.as_ref();
    let read_err = |source: io::Error| KlineError::Read {
        path: path.to_path_buf(),
        source,
    };

    let reader = BufReader::new(File::open(path).map_err(read_err)?);
    let mut candles = Vec::new();

    for line in reader.lines() {
        let line = line.map_err(read_err)?;
        if line.trim().is_empty() {
            continue;
        }
        candles.push(serde_json::from_str(&line)?);
    }

    Ok(candles)
}
