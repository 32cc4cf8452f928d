mod extensions;
