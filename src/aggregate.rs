use crate::error::{Error, Result};
use crate::variant::{AnnotationValue, VariantRecord};

/// Integer value of INFO/`key`, or `None` when the record should be skipped.
/// Only an integer-typed value counts; anything else is not an error.
pub fn integer_field(record: &VariantRecord, key: &str) -> Option<i64> {
    match record.info(key) {
        AnnotationValue::Int(v) => Some(v),
        AnnotationValue::Absent
        | AnnotationValue::Float(_)
        | AnnotationValue::Str(_)
        | AnnotationValue::Flag => None,
    }
}

/// Running sum and count of observed values.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunningAggregate {
    sum: f64,
    count: u64,
}

impl RunningAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn observe(&mut self, value: i64) {
        self.sum += value as f64;
        self.count += 1;
    }

    pub fn sum(&self) -> f64 {
        self.sum
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// The mean of all observed values. With nothing observed the mean is
    /// undefined and this returns [`Error::DivisionUndefined`] naming `field`.
    pub fn finalize(&self, field: &str) -> Result<f64> {
        if self.count == 0 {
            return Err(Error::DivisionUndefined {
                field: field.to_string(),
            });
        }
        Ok(self.sum / self.count as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::variant::records_from_text;

    const HEADER: &str = "##fileformat=VCFv4.2\n\
##contig=<ID=chr1,length=10000>\n\
##INFO=<ID=AN,Number=1,Type=Integer,Description=\"Total number of alleles\">\n\
##INFO=<ID=DP,Number=1,Type=Integer,Description=\"Depth\">\n\
##INFO=<ID=AF,Number=A,Type=Float,Description=\"Allele frequency\">\n\
##INFO=<ID=DB,Number=0,Type=Flag,Description=\"dbSNP\">\n\
##INFO=<ID=NOTE,Number=1,Type=String,Description=\"Free text\">\n\
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n";

    fn records(infos: &[&str]) -> Vec<VariantRecord> {
        let body: String = infos
            .iter()
            .enumerate()
            .map(|(i, info)| format!("chr1\t{}\t.\tA\tC\t.\t.\t{}\n", i + 1, info))
            .collect();
        records_from_text(&format!("{}{}", HEADER, body))
    }

    #[test]
    fn test_integer_field_only_accepts_int() {
        let recs = records(&["AN=12", "DP=2", "AN=.", "AN=ten", "AF=0.5", "DB", "NOTE=7", "XX=9"]);
        let got: Vec<Option<i64>> = recs.iter().map(|r| integer_field(r, "AN")).collect();
        assert_eq!(got, vec![Some(12), None, None, None, None, None, None, None]);
        assert_eq!(integer_field(&recs[1], "DP"), Some(2));
        assert_eq!(integer_field(&recs[4], "AF"), None);
        assert_eq!(integer_field(&recs[5], "DB"), None);
        assert_eq!(integer_field(&recs[6], "NOTE"), None);
        // undeclared keys are strings to htslib
        assert_eq!(integer_field(&recs[7], "XX"), None);
    }

    #[test]
    fn test_empty_is_division_undefined() {
        let agg = RunningAggregate::new();
        let err = agg.finalize("AN").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DivisionUndefined);
        assert!(err.to_string().contains("INFO/AN"));
    }

    #[test]
    fn test_mean_matches_oracle() {
        let values: Vec<i64> = (0..1000).map(|i| (i * 7919) % 5003 - 1200).collect();
        let mut agg = RunningAggregate::new();
        for v in &values {
            agg.observe(*v);
        }
        let oracle = values.iter().sum::<i64>() as f64 / values.len() as f64;
        assert_eq!(agg.count(), 1000);
        assert!((agg.finalize("AN").unwrap() - oracle).abs() < 1e-9);
    }

    #[test]
    fn test_skipped_records_do_not_change_aggregate() {
        let recs = records(&["AN=10", "DB", "AN=.", "AN=ten", "XX=1;AN=20"]);
        let mut agg = RunningAggregate::new();
        for v in recs.iter().filter_map(|r| integer_field(r, "AN")) {
            agg.observe(v);
        }
        assert_eq!(agg.count(), 2);
        assert_eq!(agg.sum(), 30.0);
        assert_eq!(format!("{:.3}", agg.finalize("AN").unwrap()), "15.000");
    }
}
