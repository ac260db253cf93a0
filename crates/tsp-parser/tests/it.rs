mod parse_and_compute_dist;
mod parse_without_error;
