use crate::evaluation::Snapshot;
use std::fs::File;
use std::io::{BufWriter, Error, Write};
use std::path::Path;
use strum_macros::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum CurveFormat {
    Csv,
    Tsv,
    Json,
}

const HEADER: [&str; 6] = [
    "samples_seen",
    "accuracy",
    "kappa",
    "log_loss",
    "brier",
    "seconds",
];

/// Snapshots collected over a prequential run, in stream order.
#[derive(Debug, Clone, Default)]
pub struct LearningCurve {
    entries: Vec<Snapshot>,
}

impl LearningCurve {
    pub fn push(&mut self, snapshot: Snapshot) {
        self.entries.push(snapshot)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<Snapshot> {
        self.entries.last().copied()
    }

    pub fn entries(&self) -> &[Snapshot] {
        &self.entries
    }

    /// Writes the curve to `path`. In JSON, non-finite metrics become `null`.
    pub fn export<P: AsRef<Path>>(&self, path: P, fmt: CurveFormat) -> Result<(), Error> {
        let mut w = BufWriter::new(File::create(path)?);
        match fmt {
            CurveFormat::Csv => self.write_delimited(&mut w, ',')?,
            CurveFormat::Tsv => self.write_delimited(&mut w, '\t')?,
            CurveFormat::Json => {
                serde_json::to_writer_pretty(&mut w, &self.entries)?;
                writeln!(w)?;
            }
        }
        w.flush()
    }

    fn write_delimited<W: Write>(&self, w: &mut W, delimiter: char) -> Result<(), Error> {
        writeln!(w, "{}", HEADER.join(&delimiter.to_string()))?;
        for s in &self.entries {
            writeln!(
                w,
                "{}{d}{:.12}{d}{:.12}{d}{:.12}{d}{:.12}{d}{:.6}",
                s.samples_seen,
                s.accuracy,
                s.kappa,
                s.log_loss,
                s.brier,
                s.seconds,
                d = delimiter
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::NamedTempFile;

    fn snap(seen: u64, acc: f64, kap: f64, secs: f64) -> Snapshot {
        Snapshot {
            samples_seen: seen,
            accuracy: acc,
            kappa: kap,
            log_loss: 0.5,
            brier: 0.125,
            seconds: secs,
        }
    }

    fn two_rows() -> LearningCurve {
        let mut lc = LearningCurve::default();
        lc.push(snap(10, 1.0, 0.5, 2.5));
        lc.push(snap(20, 0.25, 0.0, 3.0));
        lc
    }

    #[test]
    fn default_is_empty_and_latest_none() {
        let lc = LearningCurve::default();
        assert!(lc.is_empty());
        assert!(lc.latest().is_none());
    }

    #[test]
    fn latest_tracks_last_push() {
        let lc = two_rows();
        assert_eq!(lc.len(), 2);
        assert_eq!(lc.latest(), Some(snap(20, 0.25, 0.0, 3.0)));
    }

    #[test]
    fn export_csv_with_two_rows() {
        let tf = NamedTempFile::new().unwrap();
        two_rows().export(tf.path(), CurveFormat::Csv).unwrap();

        let got = fs::read_to_string(tf.path()).unwrap();
        let exp = "\
samples_seen,accuracy,kappa,log_loss,brier,seconds
10,1.000000000000,0.500000000000,0.500000000000,0.125000000000,2.500000
20,0.250000000000,0.000000000000,0.500000000000,0.125000000000,3.000000
";
        assert_eq!(got, exp);
    }

    #[test]
    fn export_tsv_header_and_rows() {
        let tf = NamedTempFile::new().unwrap();
        two_rows().export(tf.path(), CurveFormat::Tsv).unwrap();

        let got = fs::read_to_string(tf.path()).unwrap();
        let mut lines = got.lines();
        assert_eq!(
            lines.next(),
            Some("samples_seen\taccuracy\tkappa\tlog_loss\tbrier\tseconds")
        );
        assert_eq!(lines.count(), 2);
    }

    #[test]
    fn export_json_round_trips() {
        let lc = two_rows();
        let tf = NamedTempFile::new().unwrap();
        lc.export(tf.path(), CurveFormat::Json).unwrap();

        let got: Vec<Snapshot> =
            serde_json::from_str(&fs::read_to_string(tf.path()).unwrap()).unwrap();
        assert_eq!(got, lc.entries());
    }

    #[test]
    fn export_empty_curves() {
        let lc = LearningCurve::default();

        let tf = NamedTempFile::new().unwrap();
        lc.export(tf.path(), CurveFormat::Csv).unwrap();
        assert_eq!(
            fs::read_to_string(tf.path()).unwrap(),
            "samples_seen,accuracy,kappa,log_loss,brier,seconds\n"
        );

        lc.export(tf.path(), CurveFormat::Json).unwrap();
        assert_eq!(fs::read_to_string(tf.path()).unwrap(), "[]\n");
    }

    #[test]
    fn format_parses_from_lowercase() {
        assert_eq!("tsv".parse::<CurveFormat>().unwrap(), CurveFormat::Tsv);
        assert!("xml".parse::<CurveFormat>().is_err());
    }
}
