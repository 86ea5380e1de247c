use rust_htslib::bcf::{self, header::TagType, record::Numeric};

/// Value of one INFO entry, typed by the header's declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationValue {
    /// Key not set on the record, not declared, or holding a missing value.
    Absent,
    Int(i64),
    Float(f64),
    Str(String),
    Flag,
}

/// One decoded VCF record.
pub struct VariantRecord(bcf::Record);

impl VariantRecord {
    pub fn new(record: bcf::Record) -> Self {
        VariantRecord(record)
    }

    pub fn record(&self) -> &bcf::Record {
        &self.0
    }

    /// Look up INFO/`key`, dispatching on its header type. Multi-valued fields
    /// give their first value. htslib declares keys missing from the header as
    /// `Type=String` when it meets them, and stores a number it cannot parse
    /// as missing, so neither ever comes back as `Int`.
    pub fn info(&self, key: &str) -> AnnotationValue {
        let tag = key.as_bytes();
        let typ = match self.0.header().info_type(tag) {
            Ok((typ, _)) => typ,
            Err(_) => return AnnotationValue::Absent,
        };
        let mut info = self.0.info(tag); /* only need mut for .flag */
        match typ {
            TagType::Integer => match info.integer() {
                Ok(Some(v)) => match v.first() {
                    Some(x) if !x.is_missing() => AnnotationValue::Int(*x as i64),
                    _ => AnnotationValue::Absent,
                },
                _ => AnnotationValue::Absent,
            },
            TagType::Float => match info.float() {
                Ok(Some(v)) => match v.first() {
                    Some(x) if !x.is_missing() => AnnotationValue::Float(*x as f64),
                    _ => AnnotationValue::Absent,
                },
                _ => AnnotationValue::Absent,
            },
            TagType::String => match info.string() {
                Ok(Some(v)) => match v.first() {
                    Some(s) if *s != b"." => {
                        AnnotationValue::Str(String::from_utf8_lossy(s).into_owned())
                    }
                    _ => AnnotationValue::Absent,
                },
                _ => AnnotationValue::Absent,
            },
            TagType::Flag => match info.flag() {
                Ok(true) => AnnotationValue::Flag,
                _ => AnnotationValue::Absent,
            },
        }
    }
}

/// Decode every record of an uncompressed VCF given as text.
#[cfg(test)]
pub(crate) fn records_from_text(text: &str) -> Vec<VariantRecord> {
    use rust_htslib::bcf::Read;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.vcf");
    std::fs::write(&path, text).unwrap();
    let mut reader = bcf::Reader::from_path(&path).unwrap();
    reader
        .records()
        .map(|r| VariantRecord::new(r.expect("error reading record")))
        .collect()
}
