pub mod chord_pack;
