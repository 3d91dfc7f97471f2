//! Widget data resolution and chart rendering.
//!
//! The pipeline for one widget is:
//!
//! 1. [`resolver`] picks the rows: inline `config.data` first, then the
//!    referenced data source (capped at [`resolver::DISPLAY_ROW_CAP`]).
//! 2. [`compositor`] picks the active layer and its effective config.
//! 3. [`dispatcher`] turns rows + chart type + config into a
//!    [`render::ChartRender`] description that a drawing backend paints.
//!
//! Every step is a pure function over already-loaded data. Nothing here
//! returns an error: missing data and unknown chart types become explicit
//! placeholder renders.

pub mod aggregate;
pub mod compositor;
pub mod dispatcher;
pub mod palette;
pub mod render;
pub mod resolver;
pub mod spec;
pub mod value;

pub use compositor::{clamp_layer_index, ComposedWidget, LayerDescriptor, LayerRender};
pub use dispatcher::{dispatch, Decorations};
pub use palette::{Palette, RenderOptions, TooltipMode};
pub use render::ChartRender;
pub use resolver::{resolve, resolve_rows, Resolution, RowOrigin, DISPLAY_ROW_CAP};
pub use spec::{ChartSpec, ConfigError};
