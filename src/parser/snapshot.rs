//! In-memory call-graph of a decoded heap profile.
//!
//! The protobuf message refers to locations, functions and strings by ID.
//! Here every reference is resolved once, so the aggregator can walk
//! samples → locations → frames without lookups.

use super::proto;
use crate::utils::config::HEAP_SAMPLE_TYPES;
use crate::utils::error::DecodeError;
use log::debug;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::rc::Rc;

/// A decoded snapshot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// Declared measurement slots, in value order
    pub sample_types: Vec<SampleType>,

    /// Samples in file order
    pub samples: Vec<Sample>,

    /// Collection time (nanoseconds since epoch, 0 if unknown)
    pub time_nanos: i64,

    /// Collection duration in nanoseconds
    pub duration_nanos: i64,
}

/// Name and unit of one measurement slot (e.g. `alloc_space` / `bytes`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleType {
    pub name: String,
    pub unit: String,
}

/// One measurement event
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// One value per sample type
    pub values: Vec<i64>,

    /// Call stack at sampling time, stack-top first
    pub locations: Vec<Rc<Location>>,
}

/// A physical call site, possibly holding several inlined frames
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub id: u64,
    pub frames: Vec<Frame>,
}

/// A single logical function activation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Fully-qualified symbol name, e.g. `k8s.io/api/core/v1.(*Pod).Unmarshal`
    pub function_name: String,

    /// Source line, if the profile recorded one
    pub line: Option<i64>,
}

impl Frame {
    pub fn new(function_name: impl Into<String>) -> Self {
        Self {
            function_name: function_name.into(),
            line: None,
        }
    }
}

impl Location {
    pub fn new(id: u64, frames: Vec<Frame>) -> Self {
        Self { id, frames }
    }
}

impl Sample {
    /// Build a sample that owns its locations
    ///
    /// **Public** - convenient for synthetic snapshots
    pub fn new(values: Vec<i64>, locations: Vec<Location>) -> Self {
        Self {
            values,
            locations: locations.into_iter().map(Rc::new).collect(),
        }
    }

    /// Iterate over every frame of every location, stack-top first
    pub fn frames(&self) -> impl Iterator<Item = &Frame> {
        self.locations.iter().flat_map(|loc| loc.frames.iter())
    }
}

impl Snapshot {
    /// Total number of frames across all samples
    pub fn frame_count(&self) -> usize {
        self.samples.iter().map(|s| s.frames().count()).sum()
    }

    /// Check whether the sample types follow the Go heap profile layout
    ///
    /// **Public** - used to warn when slot names will be misread
    pub fn is_heap_layout(&self) -> bool {
        self.sample_types.len() == HEAP_SAMPLE_TYPES.len()
            && self
                .sample_types
                .iter()
                .zip(HEAP_SAMPLE_TYPES)
                .all(|(st, expected)| st.name == *expected)
    }

    /// Resolve a decoded protobuf profile into a snapshot
    ///
    /// **Public** - called by the loader after protobuf decoding
    ///
    /// # Errors
    /// * `DecodeError::StringTable` - table empty or not starting with ""
    /// * `DecodeError::StringIndex` - string reference out of range
    /// * `DecodeError::ReservedId` - function or location with ID 0
    /// * `DecodeError::DuplicateId` - two functions or two locations share an ID
    /// * `DecodeError::MissingFunction` - line refers to an unknown function
    /// * `DecodeError::MissingLocation` - sample refers to an unknown location
    /// * `DecodeError::ValueCount` - sample value count differs from sample types
    pub fn from_proto(profile: proto::Profile) -> Result<Self, DecodeError> {
        let strings = &profile.string_table;
        if strings.first().map(String::as_str) != Some("") {
            return Err(DecodeError::StringTable);
        }

        let sample_types = profile
            .sample_type
            .iter()
            .map(|vt| -> Result<SampleType, DecodeError> {
                Ok(SampleType {
                    name: lookup_string(strings, vt.r#type)?.to_string(),
                    unit: lookup_string(strings, vt.unit)?.to_string(),
                })
            })
            .collect::<Result<Vec<_>, DecodeError>>()?;

        let mut functions: HashMap<u64, &str> = HashMap::with_capacity(profile.function.len());
        for function in &profile.function {
            let name = lookup_string(strings, function.name)?;
            insert_unique(&mut functions, "function", function.id, name)?;
        }

        let mut locations: HashMap<u64, Rc<Location>> =
            HashMap::with_capacity(profile.location.len());
        for location in &profile.location {
            let frames = location
                .line
                .iter()
                .map(|line| resolve_frame(line, &functions))
                .collect::<Result<Vec<_>, DecodeError>>()?;
            let resolved = Rc::new(Location::new(location.id, frames));
            insert_unique(&mut locations, "location", location.id, resolved)?;
        }

        let mut samples = Vec::with_capacity(profile.sample.len());
        for (index, sample) in profile.sample.into_iter().enumerate() {
            if sample.value.len() != sample_types.len() {
                return Err(DecodeError::ValueCount {
                    sample: index,
                    expected: sample_types.len(),
                    found: sample.value.len(),
                });
            }

            let stack = sample
                .location_id
                .iter()
                .map(|id| {
                    locations
                        .get(id)
                        .cloned()
                        .ok_or(DecodeError::MissingLocation(*id))
                })
                .collect::<Result<Vec<_>, DecodeError>>()?;

            samples.push(Sample {
                values: sample.value,
                locations: stack,
            });
        }

        debug!(
            "Resolved {} samples, {} locations, {} functions",
            samples.len(),
            locations.len(),
            functions.len()
        );

        Ok(Snapshot {
            sample_types,
            samples,
            time_nanos: profile.time_nanos,
            duration_nanos: profile.duration_nanos,
        })
    }
}

/// Insert into an ID map, rejecting ID 0 and repeated IDs
///
/// **Private** - internal helper for from_proto
fn insert_unique<V>(
    map: &mut HashMap<u64, V>,
    kind: &'static str,
    id: u64,
    value: V,
) -> Result<(), DecodeError> {
    if id == 0 {
        return Err(DecodeError::ReservedId { kind });
    }
    match map.entry(id) {
        Entry::Occupied(_) => Err(DecodeError::DuplicateId { kind, id }),
        Entry::Vacant(slot) => {
            slot.insert(value);
            Ok(())
        }
    }
}

/// Resolve one protobuf line into a frame
///
/// **Private** - function ID 0 means "no function" and yields an empty name
fn resolve_frame(line: &proto::Line, functions: &HashMap<u64, &str>) -> Result<Frame, DecodeError> {
    let function_name = if line.function_id == 0 {
        String::new()
    } else {
        functions
            .get(&line.function_id)
            .ok_or(DecodeError::MissingFunction(line.function_id))?
            .to_string()
    };

    Ok(Frame {
        function_name,
        line: (line.line != 0).then_some(line.line),
    })
}

/// Look up an entry of the string table
///
/// **Private** - internal helper for from_proto
fn lookup_string(strings: &[String], index: i64) -> Result<&str, DecodeError> {
    usize::try_from(index)
        .ok()
        .and_then(|i| strings.get(i))
        .map(String::as_str)
        .ok_or(DecodeError::StringIndex {
            index,
            len: strings.len(),
        })
}
