use crc32fast::Hasher;
use uuid::Uuid;

/// Derive a stable document seed from a document name using CRC32
pub fn get_document_id(name: &str) -> String {
    let mut buff = String::from(name);
    if !name.starts_with("pagecraft://") {
        buff = format!("pagecraft://{}", buff);
    }

    let mut hasher = Hasher::new();
    hasher.update(buff.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential id generator for nodes and sections.
///
/// Ids are `<seed>-<n>` with `n` strictly increasing, so a generator never
/// hands out the same id twice.
#[derive(Debug, Clone)]
pub struct IDGenerator {
    seed: String,
    count: u64,
}

impl IDGenerator {
    /// Seeded from a document name (same name, same id sequence)
    pub fn new(name: &str) -> Self {
        Self::from_seed(get_document_id(name))
    }

    /// Seeded from a fresh v4 uuid
    pub fn random() -> Self {
        let uuid = Uuid::new_v4().simple().to_string();
        Self::from_seed(uuid[..12].to_string())
    }

    pub fn from_seed(seed: String) -> Self {
        Self { seed, count: 0 }
    }

    /// Generate next sequential id
    pub fn new_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }

    /// Generate next id under a readable prefix (`skills-3`)
    pub fn new_prefixed_id(&mut self, prefix: &str) -> String {
        self.count += 1;
        format!("{}-{}", prefix, self.count)
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}

impl Default for IDGenerator {
    fn default() -> Self {
        Self::random()
    }
}
