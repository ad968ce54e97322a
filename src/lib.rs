//! # constellation-atlas
//!
//! Builds a static **constellation atlas** for sky-sketching clients: for every
//! constellation, the stick-figure segments and the positions and magnitudes
//! of its stars plus nearby background stars, already flattened onto a 2D
//! plane so the client can draw without any astronomical computation.
//!
//! ## Example
//!
//! ```no_run
//! use constellation_atlas::catalogs::{hipparcos, stellarium};
//! use constellation_atlas::{build_atlas, write_atlas_to_file, AtlasConfig, StarCatalog};
//!
//! let config = AtlasConfig::default();
//! let names = stellarium::load_constellation_names_from_file("constellation_names.eng.fab")?;
//! let lines = stellarium::load_constellation_lines_from_file("constellationship.fab")?;
//! let rows = hipparcos::load_hipparcos_catalog_from_file("hipparcos_catalog.tsv")?;
//! let catalog = StarCatalog::from_hipparcos(&rows, config.load_magnitude_limit());
//!
//! let report = build_atlas(&lines, &names, &catalog, &config);
//! write_atlas_to_file(&report.atlas, "constellation_data.json")?;
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Pipeline
//!
//! 1. **Extent**: mean center of the member stars (aware of the 0h seam) and
//!    a generous corner-to-corner angular radius
//! 2. **Neighbors**: member stars first, then background stars brighter than
//!    the cutoff within that radius
//! 3. **Projection**: stereographic projection tangent at the center
//! 4. **Normalization**: members scaled into the unit square with aspect
//!    preserved; background stars clipped to a 10% margin around it
//! 5. **Encoding**: coordinates as integers in `[0, 1000]` for members and
//!    `[-100, 1100]` for margin stars, magnitudes in tenths, segments as
//!    indices into the member block
//!
//! The output is a single compact, key-sorted JSON document mapping each
//! constellation's full name to its entry.

/// Input table readers: Hipparcos star catalog, Stellarium sky-culture tables
pub mod catalogs;
pub mod constellation;
pub mod sketch;
pub mod star;
pub mod starcatalog;

pub use constellation::ConstellationSpec;
pub use sketch::encode::{
    write_atlas, write_atlas_to_file, Atlas, CatalogEntry, EncodedStars, LineIndices,
};
pub use sketch::{
    build_atlas, sketch_constellation, AtlasConfig, AtlasReport, ConstellationFailure,
    SketchError, DIMMEST_CONSTELLATION_STAR, PADDING_FRACTION, VMAG_CUTOFF,
};
pub use star::*;
pub use starcatalog::*;
