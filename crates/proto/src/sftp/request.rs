//! Request ID allocation and correlation.
//!
//! Every request-carrying SFTP packet is tagged with a 32-bit ID the
//! client chooses; the server echoes it in the response. IDs below
//! [`REQUEST_ID_OFFSET`] are reserved, and among the rest the allocator
//! always issues the lowest one not currently outstanding, so the ID
//! space stays dense no matter how responses interleave.
//!
//! The table is a vector of records sorted by ID. Because the in-use
//! prefix of the ID space is dense, the lowest free ID can be found by
//! binary search in O(log n) comparisons: locate the longest prefix
//! whose record at index `m` still has ID `m + REQUEST_ID_OFFSET`; the
//! first gap sits right behind it.

use tracing::debug;

/// Request IDs below this value are never issued.
pub const REQUEST_ID_OFFSET: u32 = 256;

/// One outstanding request.
///
/// A record is created by [`RequestTable::alloc`] before the send and
/// recognised on response only once it has been registered; responses
/// naming an unregistered ID are a correlation error. The `tag` slot
/// carries per-request bookkeeping for pipelined callers (the transfer
/// engine stores a chunk sequence number) and is never interpreted by
/// the table.
#[derive(Debug)]
pub struct Request {
    id: u32,
    registered: bool,
    tag: Option<u64>,
}

impl Request {
    /// The request ID.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// The caller-attached tag, if any.
    pub fn tag(&self) -> Option<u64> {
        self.tag
    }

    pub(crate) fn is_registered(&self) -> bool {
        self.registered
    }
}

/// The set of outstanding requests, ordered by ID.
#[derive(Debug, Default)]
pub struct RequestTable {
    entries: Vec<Request>,
}

impl RequestTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, id: u32) -> Result<usize, usize> {
        self.entries.binary_search_by_key(&id, |r| r.id)
    }

    /// Allocates the lowest unused request ID and inserts an
    /// unregistered record for it.
    ///
    /// Binary-searches for the largest index `m` whose record has ID
    /// `m + REQUEST_ID_OFFSET` (everything at or before it forms a
    /// dense run from the start); the new ID is the one just past that
    /// run, which is also its insertion index.
    pub fn alloc(&mut self) -> u32 {
        let mut low: isize = -1;
        let mut high: isize = self.entries.len() as isize;
        while high - low > 1 {
            let mid = (high + low) / 2;
            if self.entries[mid as usize].id == mid as u32 + REQUEST_ID_OFFSET {
                low = mid;
            } else {
                high = mid;
            }
        }

        let index = (low + 1) as usize;
        let id = index as u32 + REQUEST_ID_OFFSET;
        debug_assert!(self.position(id).is_err());

        self.entries.insert(
            index,
            Request {
                id,
                registered: false,
                tag: None,
            },
        );
        debug!("allocated request id {}", id);
        id
    }

    /// Marks the record as recognisable to response correlation. Must
    /// be called once the send publishing the ID has completed.
    pub fn register(&mut self, id: u32) {
        if let Ok(index) = self.position(id) {
            self.entries[index].registered = true;
        }
    }

    /// Attaches a tag to the record.
    pub fn set_tag(&mut self, id: u32, tag: u64) {
        if let Ok(index) = self.position(id) {
            self.entries[index].tag = Some(tag);
        }
    }

    /// Looks up a record by ID.
    pub fn get(&self, id: u32) -> Option<&Request> {
        self.position(id).ok().map(|index| &self.entries[index])
    }

    /// Removes a record by ID and hands it to the caller.
    pub fn remove(&mut self, id: u32) -> Option<Request> {
        match self.position(id) {
            Ok(index) => Some(self.entries.remove(index)),
            Err(_) => None,
        }
    }

    /// Number of outstanding records.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every outstanding record, abandoned responses included.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
