pub mod codec;
pub mod gene;
pub mod genome;
pub mod observer;
pub mod schema;

pub use codec::{compress, is_compressed, parse_strand, uncompress, STRAND_LEN};
pub use gene::{Gene, ALPHABET, BLOCK_LEN};
pub use genome::Genome;
pub use observer::{ChannelObserver, LoggingObserver, NoopObserver, ParameterChange, ParameterObserver};
pub use schema::{GeneId, GeneSpec, GENE_COUNT, SCHEMA, SCHEMA_VERSION};
