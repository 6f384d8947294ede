//! Builders for synthetic pprof heap profiles.

#![allow(dead_code)]

use flate2::write::GzEncoder;
use flate2::Compression;
use prost::Message;
use std::io::Write;
use std::path::{Path, PathBuf};
use unmarshal_heap::parser::proto;

/// Builds a heap profile with the standard four sample types
pub struct ProfileBuilder {
    profile: proto::Profile,
}

impl ProfileBuilder {
    pub fn new() -> Self {
        let mut builder = Self {
            profile: proto::Profile {
                string_table: vec![String::new()],
                ..Default::default()
            },
        };
        for (name, unit) in [
            ("alloc_objects", "count"),
            ("alloc_space", "bytes"),
            ("inuse_objects", "count"),
            ("inuse_space", "bytes"),
        ] {
            let vt = proto::ValueType {
                r#type: builder.intern(name),
                unit: builder.intern(unit),
            };
            builder.profile.sample_type.push(vt);
        }
        builder
    }

    fn intern(&mut self, s: &str) -> i64 {
        let table = &mut self.profile.string_table;
        match table.iter().position(|e| e == s) {
            Some(i) => i as i64,
            None => {
                table.push(s.to_string());
                (table.len() - 1) as i64
            }
        }
    }

    fn function_id(&mut self, name: &str) -> u64 {
        let name_idx = self.intern(name);
        if let Some(f) = self.profile.function.iter().find(|f| f.name == name_idx) {
            return f.id;
        }
        let id = self.profile.function.len() as u64 + 1;
        self.profile.function.push(proto::Function {
            id,
            name: name_idx,
            ..Default::default()
        });
        id
    }

    /// Add a location holding the given (inlined) frames, returns its ID
    pub fn location(&mut self, frames: &[&str]) -> u64 {
        let lines = frames
            .iter()
            .map(|name| proto::Line {
                function_id: self.function_id(name),
                line: 42,
            })
            .collect();
        let id = self.profile.location.len() as u64 + 1;
        self.profile.location.push(proto::Location {
            id,
            line: lines,
            ..Default::default()
        });
        id
    }

    /// Add a sample whose stack has one single-frame location per name
    pub fn sample(mut self, values: [i64; 4], frames: &[&str]) -> Self {
        let ids = frames.iter().map(|f| self.location(&[*f])).collect();
        self.profile.sample.push(proto::Sample {
            location_id: ids,
            value: values.to_vec(),
        });
        self
    }

    /// Add a sample over existing location IDs
    pub fn sample_at(mut self, values: Vec<i64>, location_ids: Vec<u64>) -> Self {
        self.profile.sample.push(proto::Sample {
            location_id: location_ids,
            value: values,
        });
        self
    }

    pub fn build(self) -> proto::Profile {
        self.profile
    }

    pub fn encode(self) -> Vec<u8> {
        self.profile.encode_to_vec()
    }

    pub fn encode_gzip(self) -> Vec<u8> {
        gzip(&self.encode())
    }
}

/// Compress bytes as a single gzip member
pub fn gzip(bytes: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes).unwrap();
    encoder.finish().unwrap()
}

/// Write bytes to `name` inside `dir`
pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}
