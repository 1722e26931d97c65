pub mod album_server;
