//! Realtime refresh: change notifications flowing from saves to editors.

mod support;
mod refresh;
mod lifecycle;
