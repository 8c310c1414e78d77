pub mod d_mle_sync;
