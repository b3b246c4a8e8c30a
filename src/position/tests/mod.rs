mod make_unmake;
mod perft;
